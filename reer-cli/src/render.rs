//! Text, table and JSON rendering of planner results.

use std::fmt::Write;

use anyhow::Result;
use reer_core::{BracketSlice, BracketTable, ScenarioResult, percent};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Formats an amount as whole dollars with thousands separators
/// (`3253.00` → `$3,253`). Cents are truncated toward zero.
pub fn dollars(amount: Decimal) -> String {
    let whole = amount.trunc().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount.trunc() < Decimal::ZERO {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn rate(value: Decimal) -> String {
    format!("{}%", percent(value))
}

/// The summary printed by `reer estimate`.
pub fn estimate_report(result: &ScenarioResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Income            {}", dollars(result.income));
    let _ = writeln!(out, "Contribution      {}", dollars(result.contribution));
    let _ = writeln!(out, "Taxable after     {}", dollars(result.reduced_income));
    let _ = writeln!(out);
    let _ = writeln!(out, "Refund            {}", dollars(result.refund));
    let _ = writeln!(out, "Interest cost     {}", dollars(result.interest_cost));
    let _ = writeln!(
        out,
        "  bridge          {}",
        dollars(result.loan.bridge_interest)
    );
    let _ = writeln!(
        out,
        "  residual        {} on {}",
        dollars(result.loan.residual_interest),
        dollars(result.loan.residual_principal)
    );
    let _ = writeln!(
        out,
        "Net gain          {} ({})",
        dollars(result.net_gain),
        result.outlook.as_str()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Your last dollar is taxed at {}.",
        rate(result.marginal_rate)
    );
    if !result.advisory.is_none() {
        let _ = writeln!(out, "{}", result.advisory.message());
    }
    out
}

#[derive(Debug, Tabled)]
struct SweepRow {
    #[tabled(rename = "Contribution")]
    contribution: String,
    #[tabled(rename = "Refund")]
    refund: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Net gain")]
    net_gain: String,
    #[tabled(rename = "Outlook")]
    outlook: &'static str,
}

/// One row per contribution option, as printed by `reer sweep`.
pub fn sweep_table(results: &[ScenarioResult]) -> String {
    let rows: Vec<SweepRow> = results
        .iter()
        .map(|r| SweepRow {
            contribution: dollars(r.contribution),
            refund: dollars(r.refund),
            interest: dollars(r.interest_cost),
            net_gain: dollars(r.net_gain),
            outlook: r.outlook.as_str(),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

#[derive(Debug, Tabled)]
struct BracketRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// The bracket table as printed by `reer brackets`.
pub fn bracket_table(table: &BracketTable) -> String {
    let rows: Vec<BracketRow> = table
        .brackets()
        .iter()
        .enumerate()
        .map(|(index, b)| BracketRow {
            from: dollars(b.threshold),
            to: table
                .upper_bound(index)
                .map_or_else(|| "-".to_string(), dollars),
            rate: rate(b.rate),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

#[derive(Debug, Tabled)]
struct SliceRow {
    #[tabled(rename = "Bracket")]
    bracket: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

/// Per-bracket split of one income.
pub fn breakdown_table(slices: &[BracketSlice]) -> String {
    let rows: Vec<SliceRow> = slices
        .iter()
        .map(|s| SliceRow {
            bracket: match s.upper {
                Some(upper) => format!("{} - {}", dollars(s.threshold), dollars(upper)),
                None => format!("{}+", dollars(s.threshold)),
            },
            taxable: dollars(s.taxable),
            rate: rate(s.rate),
            tax: dollars(s.tax),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
