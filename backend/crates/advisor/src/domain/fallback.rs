//! Fallback formulas
//!
//! Degraded answers computed locally when the upstream provider is exhausted.
//! Everything here is pure and deterministic.

use std::collections::BTreeMap;

use crate::domain::models::{Expense, FinancialGoal, PortfolioItem};
use crate::domain::value_objects::CurrencyCode;

/// Approximate units per US dollar
const USD_REFERENCE_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("INR", 83.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 150.0),
    ("CNY", 7.2),
    ("AUD", 1.52),
    ("CAD", 1.36),
    ("CHF", 0.88),
    ("SGD", 1.34),
    ("HKD", 7.8),
    ("AED", 3.6725),
];

/// Position weight above which the summary warns about concentration
const CONCENTRATION_WARNING_PERCENT: f64 = 40.0;

fn usd_rate(code: &CurrencyCode) -> Option<f64> {
    USD_REFERENCE_RATES
        .iter()
        .find(|(c, _)| *c == code.as_str())
        .map(|(_, rate)| *rate)
}

/// Cross rate from the reference table; `None` if either currency is unknown
pub fn reference_rate(base: &CurrencyCode, quote: &CurrencyCode) -> Option<f64> {
    if base == quote {
        return Some(1.0);
    }
    Some(usd_rate(quote)? / usd_rate(base)?)
}

fn money(amount: f64) -> String {
    format!("₹{amount:.2}")
}

pub fn portfolio_summary(portfolio: &[PortfolioItem]) -> String {
    if portfolio.is_empty() {
        return "Your portfolio is empty. Add a few holdings to get an analysis.".to_string();
    }

    let value: f64 = portfolio.iter().map(PortfolioItem::market_value).sum();
    let cost: f64 = portfolio.iter().map(PortfolioItem::cost_basis).sum();
    let gain_percent = if cost > 0.0 {
        (value - cost) / cost * 100.0
    } else {
        0.0
    };

    let mut text = format!(
        "Detailed analysis is unavailable right now, so here is a quick snapshot. \
         Your {} holdings are worth {} against a cost of {}, an unrealised {} of {:.1}%.",
        portfolio.len(),
        money(value),
        money(cost),
        if value >= cost { "gain" } else { "loss" },
        gain_percent.abs()
    );

    let largest = portfolio
        .iter()
        .max_by(|a, b| a.market_value().total_cmp(&b.market_value()));
    if let Some(largest) = largest.filter(|_| value > 0.0) {
        let weight = largest.market_value() / value * 100.0;
        text.push_str(&format!(
            " Your largest position, {}, is {:.1}% of the portfolio.",
            largest.name, weight
        ));
        if weight > CONCENTRATION_WARNING_PERCENT && portfolio.len() > 1 {
            text.push_str(" Consider spreading that weight across other holdings.");
        }
    }
    text
}

pub fn goal_summary(goal: &FinancialGoal) -> String {
    let progress = goal.progress_percent();
    if goal.is_loan {
        format!(
            "You have repaid {} of the {} loan \"{}\" ({:.1}%). {} remains outstanding; \
             extra payments towards it reduce the interest you pay.",
            money(goal.current_amount),
            money(goal.target_amount),
            goal.name,
            progress,
            money(goal.remaining())
        )
    } else if goal.remaining() <= 0.0 {
        format!(
            "You have reached your goal \"{}\" with {} saved. Well done!",
            goal.name,
            money(goal.current_amount)
        )
    } else {
        format!(
            "You have saved {} of {} for \"{}\" ({:.1}%). {} to go; a fixed monthly \
             transfer on payday keeps progress steady.",
            money(goal.current_amount),
            money(goal.target_amount),
            goal.name,
            progress,
            money(goal.remaining())
        )
    }
}

pub fn expense_summary(
    expenses: &[Expense],
    goals: &[FinancialGoal],
    monthly_income: f64,
) -> String {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        *by_category.entry(expense.category.as_str()).or_default() += expense.amount;
    }
    let top = by_category
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(category, amount)| (*category, *amount));

    let mut text = format!(
        "Detailed advice is unavailable right now. This month you spent {}",
        money(total)
    );
    if monthly_income > 0.0 {
        let savings = monthly_income - total;
        let rate = savings / monthly_income * 100.0;
        text.push_str(&format!(
            " of your {} income, a savings rate of {:.1}%.",
            money(monthly_income),
            rate
        ));
    } else {
        text.push('.');
    }
    if let Some((category, amount)) = top {
        text.push_str(&format!(
            " Your biggest category is {} at {}.",
            category,
            money(amount)
        ));
    }
    let open_goals = goals.iter().filter(|g| g.remaining() > 0.0).count();
    if open_goals > 0 {
        text.push_str(&format!(
            " Trimming it would free money for your {open_goals} open goal{}.",
            if open_goals == 1 { "" } else { "s" }
        ));
    }
    text
}
