use crate::domain::model::{
    Advisory, AffordabilityResult, BreakdownSlice, BudgetBreakdown, ExpenseCategory, ExpenseSet,
    HouseholdMode, SliceKind,
};

/// Below this share of the ratio bound the result is flagged as squeezed by
/// required expenses.
const RATIO_SHORTFALL_FACTOR: f64 = 0.7;

/// Maximum sustainable rent: the lower of the percentage-of-income rule and
/// what remains after required expenses, clamped at zero.
///
/// A result of 0 with positive income means "not affordable"; callers decide
/// whether the income itself was meaningful.
pub fn affordable_rent(
    monthly_income: f64,
    rent_percentage: f64,
    required_expenses_total: f64,
) -> f64 {
    let by_ratio = monthly_income * (rent_percentage / 100.0);
    let by_residual = monthly_income - required_expenses_total;
    by_ratio.min(by_residual).max(0.0)
}

/// Sum of all required categories, taking overrides where present and the
/// household-mode default otherwise.
pub fn required_expenses_total(
    categories: &[ExpenseCategory],
    mode: HouseholdMode,
    overrides: &ExpenseSet,
) -> f64 {
    categories
        .iter()
        .filter(|category| category.is_required)
        .map(|category| overrides.effective_amount(category, mode))
        .sum()
}

/// Same as [`required_expenses_total`] but over every category.
pub fn total_expenses(
    categories: &[ExpenseCategory],
    mode: HouseholdMode,
    overrides: &ExpenseSet,
) -> f64 {
    categories
        .iter()
        .map(|category| overrides.effective_amount(category, mode))
        .sum()
}

/// Full affordability evaluation: both bounds, the clamped ceiling, and the
/// advisory the UI layer surfaces as a notification.
pub fn evaluate(
    categories: &[ExpenseCategory],
    mode: HouseholdMode,
    overrides: &ExpenseSet,
    monthly_income: f64,
    rent_percentage: f64,
) -> AffordabilityResult {
    let by_ratio = monthly_income * (rent_percentage / 100.0);
    let required = required_expenses_total(categories, mode, overrides);
    let by_residual = monthly_income - required;
    let ceiling = by_ratio.min(by_residual).max(0.0);

    let advisory = if ceiling <= 0.0 {
        Advisory::IncomeTooLow
    } else if ceiling < by_ratio * RATIO_SHORTFALL_FACTOR {
        Advisory::TighterThanRatio
    } else {
        Advisory::OnTrack
    };

    AffordabilityResult {
        ceiling,
        by_ratio,
        by_residual,
        affordable: ceiling > 0.0,
        advisory,
    }
}

/// Income vs. spending summary at the computed ceiling. Slices are sorted by
/// descending amount, the order chart collaborators consume.
pub fn breakdown(
    categories: &[ExpenseCategory],
    mode: HouseholdMode,
    overrides: &ExpenseSet,
    monthly_income: f64,
    ceiling: f64,
) -> BudgetBreakdown {
    let mut slices = vec![BreakdownSlice {
        id: "rent".to_string(),
        name: "Rent".to_string(),
        amount: ceiling,
        kind: SliceKind::Rent,
    }];

    for category in categories {
        slices.push(BreakdownSlice {
            id: category.id.clone(),
            name: category.name.clone(),
            amount: overrides.effective_amount(category, mode),
            kind: if category.is_required {
                SliceKind::Required
            } else {
                SliceKind::Optional
            },
        });
    }

    slices.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let total_expenses: f64 = slices.iter().map(|slice| slice.amount).sum();
    let remaining = monthly_income - total_expenses;
    let usage_percent = if monthly_income > 0.0 {
        (total_expenses / monthly_income * 100.0).min(100.0)
    } else {
        0.0
    };

    BudgetBreakdown {
        slices,
        total_expenses,
        remaining,
        usage_percent,
        sufficient: monthly_income >= total_expenses,
    }
}
