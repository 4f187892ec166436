use crate::utils::error::{BudgetError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BudgetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Monetary amounts are euros per month and must never be negative.
pub fn validate_amount(field_name: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: amount.to_string(),
            reason: "Amount must be a finite number".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: amount.to_string(),
            reason: "Amount cannot be negative".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("data_url", "https://example.com").is_ok());
        assert!(validate_url("data_url", "http://example.com").is_ok());
        assert!(validate_url("data_url", "").is_err());
        assert!(validate_url("data_url", "invalid-url").is_err());
        assert!(validate_url("data_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("income", 2500.0).is_ok());
        assert!(validate_amount("income", 0.0).is_ok());
        assert!(validate_amount("income", -1.0).is_err());
        assert!(validate_amount("income", f64::NAN).is_err());
        assert!(validate_amount("income", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("rent_percentage", 30.0, 0.0, 100.0).is_ok());
        assert!(validate_range("rent_percentage", 0.0, 0.0, 100.0).is_ok());
        assert!(validate_range("rent_percentage", 100.0, 0.0, 100.0).is_ok());
        assert!(validate_range("rent_percentage", 101.0, 0.0, 100.0).is_err());
        assert!(validate_range("rent_percentage", -5.0, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "mitte").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
