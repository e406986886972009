//! Prompt construction for the text generator

use std::fmt::Write;

use crate::domain::models::{ChatTurn, Expense, FinancialGoal, PortfolioItem};
use crate::domain::upstream::TextPrompt;

/// Persona used when a chat request brings no system instruction
pub const DEFAULT_CHAT_INSTRUCTION: &str = "You are a friendly and knowledgeable personal finance \
assistant for an Indian user. Give practical, concise guidance and amounts in INR. \
You are not a licensed advisor; say so when asked for specific investment decisions.";

const ADVISOR_INSTRUCTION: &str = "You are a careful personal finance advisor. \
Answer in plain text with short paragraphs or bullet points. Amounts are in INR.";

pub fn analyze_portfolio(portfolio: &[PortfolioItem]) -> TextPrompt {
    let mut text = String::from(
        "Analyze this stock portfolio. Comment on diversification, concentration risk \
         and unrealised gains or losses, then give three actionable suggestions.\n\nHoldings:\n",
    );
    if portfolio.is_empty() {
        text.push_str("(no holdings yet)\n");
    }
    for item in portfolio {
        let _ = writeln!(
            text,
            "- {} ({}): {} shares, average price {:.2}, current price {:.2}",
            item.name, item.ticker, item.shares, item.avg_price, item.current_price
        );
    }
    TextPrompt::user(text).with_system_instruction(ADVISOR_INSTRUCTION)
}

pub fn goal_advice(goal: &FinancialGoal) -> TextPrompt {
    let kind = if goal.is_loan { "loan to repay" } else { "savings goal" };
    let text = format!(
        "Give advice for this {kind}: \"{}\". Target {:.2}, progress so far {:.2} ({:.1}%). \
         Suggest a realistic monthly plan and two tips to reach it faster.",
        goal.name,
        goal.target_amount,
        goal.current_amount,
        goal.progress_percent()
    );
    TextPrompt::user(text).with_system_instruction(ADVISOR_INSTRUCTION)
}

pub fn expense_advice(
    expenses: &[Expense],
    goals: &[FinancialGoal],
    monthly_income: f64,
) -> TextPrompt {
    let mut text = format!(
        "Review this month's spending against a monthly income of {monthly_income:.2}. \
         Point out the categories to cut and how the savings could fund the goals.\n\nExpenses:\n"
    );
    if expenses.is_empty() {
        text.push_str("(none recorded)\n");
    }
    for expense in expenses {
        let _ = writeln!(
            text,
            "- {} {}: {:.2} ({})",
            expense.date, expense.description, expense.amount, expense.category
        );
    }
    text.push_str("\nGoals:\n");
    if goals.is_empty() {
        text.push_str("(none)\n");
    }
    for goal in goals {
        let _ = writeln!(
            text,
            "- {}{}: {:.2} of {:.2}",
            goal.name,
            if goal.is_loan { " (loan)" } else { "" },
            goal.current_amount,
            goal.target_amount
        );
    }
    TextPrompt::user(text).with_system_instruction(ADVISOR_INSTRUCTION)
}

pub fn market_news(topic: &str) -> TextPrompt {
    let text = format!(
        "List five recent financial news items about \"{topic}\". Respond with only a JSON \
         array of objects with the string fields \"title\", \"summary\" and \"source\"."
    );
    TextPrompt::user(text)
}

pub fn chat(history: &[ChatTurn], new_message: &str, system_instruction: Option<&str>) -> TextPrompt {
    TextPrompt::conversation(history, new_message)
        .with_system_instruction(system_instruction.unwrap_or(DEFAULT_CHAT_INSTRUCTION))
}
