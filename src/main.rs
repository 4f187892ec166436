use clap::Parser;
use kiez_budget::config::scenario::ScenarioConfig;
use kiez_budget::report;
use kiez_budget::utils::{logger, validation::Validate};
use kiez_budget::{BudgetEngine, CliConfig, HttpStore, LocalStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting kiez-budget CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let scenario = match &config.scenario {
        Some(path) => match ScenarioConfig::from_file(path) {
            Ok(scenario) => {
                if let Err(e) = scenario.validate() {
                    tracing::error!("❌ Scenario validation failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
                tracing::info!("📂 Loaded scenario '{}'", scenario.scenario.name);
                Some(scenario)
            }
            Err(e) => {
                tracing::error!("❌ Failed to load scenario {}: {}", path, e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let inputs = match config.resolve(scenario.as_ref()) {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::error!("❌ Input resolution failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = inputs.validate() {
        tracing::error!("❌ Input validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // A ceiling computed from zero income is arithmetically fine but
    // meaningless to act on.
    if inputs.monthly_income <= 0.0 {
        eprintln!("❌ Please enter a valid monthly income");
        std::process::exit(1);
    }

    let report = if let Some(url) = config.data_source_url(scenario.as_ref()) {
        tracing::info!("🌐 Loading datasets from {}", url);
        let store = HttpStore::new(&url)?;
        BudgetEngine::new(store, inputs).run().await?
    } else {
        let data_dir = config.data_directory(scenario.as_ref());
        tracing::info!("📂 Loading datasets from {}", data_dir);
        let store = LocalStore::new(data_dir);
        BudgetEngine::new(store, inputs).run().await?
    };

    println!("{}", report::render_text(&report));

    if let Some(dir) = config.export_directory(scenario.as_ref()) {
        let out_store = LocalStore::new(dir.clone());
        report::export(&report, &out_store).await?;
        tracing::info!("✅ Session complete");
        println!("📁 Exports saved to: {}", dir);
    }

    Ok(())
}
