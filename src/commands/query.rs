//! Read-only commands: `list`, `total` and `categories`.

use crate::args::{ListArgs, ListFormat};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Expense};
use crate::{Config, Result};
use anyhow::{anyhow, Context};

const HEADERS: [&str; 3] = ["Description", "Amount", "Category"];

/// Renders the working list in the requested format.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Expense>>> {
    let tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    let expenses = tracker.expenses().to_vec();
    let rendered = match args.format() {
        ListFormat::Table => to_table(&expenses),
        ListFormat::Json => serde_json::to_string_pretty(&tracker)
            .context("Unable to serialize expenses")
            .pub_result(ErrorType::Io)?,
        ListFormat::Csv => to_csv(&expenses).pub_result(ErrorType::Io)?,
    };
    Ok(Out::new(rendered, expenses))
}

/// Sums every amount in the working list.
pub fn total(config: Config) -> Result<Out<Amount>> {
    let tracker = config.load_expenses().pub_result(ErrorType::Io)?;
    let total = tracker.total().pub_result(ErrorType::Validation)?;
    Ok(Out::new(format!("Total Expenses: {total}"), total))
}

/// Lists the configured category presets, marking the default.
pub fn categories(config: Config) -> Result<Out<Vec<String>>> {
    let presets = config.categories().to_vec();
    let message = presets
        .iter()
        .map(|c| {
            if c == config.default_category() {
                format!("{c} (default)")
            } else {
                c.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, presets))
}

/// An aligned plain-text table. Amounts are right-aligned with two decimals.
fn to_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return String::from("No expenses recorded.");
    }
    let rows: Vec<[String; 3]> = expenses
        .iter()
        .map(|e| {
            [
                e.description().to_string(),
                e.amount().to_string(),
                e.category().to_string(),
            ]
        })
        .collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let [dw, aw, cw] = widths;

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "{:<dw$}  {:>aw$}  {:<cw$}",
        HEADERS[0], HEADERS[1], HEADERS[2]
    ));
    lines.push(format!(
        "{}  {}  {}",
        "-".repeat(dw),
        "-".repeat(aw),
        "-".repeat(cw)
    ));
    for [d, a, c] in rows {
        lines.push(format!("{d:<dw$}  {a:>aw$}  {c:<cw$}"));
    }
    lines
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_csv(expenses: &[Expense]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADERS)?;
    for e in expenses {
        let amount = e.amount().to_string();
        wtr.write_record([e.description(), amount.as_str(), e.category()])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Unable to flush CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tracker;
    use crate::test::TestEnv;

    #[test]
    fn test_list_table() {
        let env = TestEnv::new();
        env.insert_sample_expenses();

        let out = list(env.config(), ListArgs::new(ListFormat::Table)).unwrap();
        let expected = "\
Description  Amount  Category
-----------  ------  --------------
Groceries     52.10  Food
Bus pass      30.00  Transportation
Pizza         18.40  Food
Movie         12.00  Entertainment";
        assert_eq!(out.message(), expected);
        assert_eq!(out.structure().unwrap().len(), 4);
    }

    #[test]
    fn test_list_empty() {
        let env = TestEnv::new();
        let out = list(env.config(), ListArgs::new(ListFormat::Table)).unwrap();
        assert_eq!(out.message(), "No expenses recorded.");
        assert!(out.structure().unwrap().is_empty());
    }

    #[test]
    fn test_list_json_matches_file_format() {
        let env = TestEnv::new();
        env.insert_sample_expenses();
        let out = list(env.config(), ListArgs::new(ListFormat::Json)).unwrap();
        let parsed: Tracker = serde_json::from_str(out.message()).unwrap();
        assert_eq!(parsed, env.sample_tracker());
    }

    #[test]
    fn test_list_csv() {
        let env = TestEnv::new();
        let mut tracker = Tracker::new();
        tracker
            .add("Lunch, with tip", "21".parse().unwrap(), "Food")
            .unwrap();
        env.config().save_expenses(&tracker).unwrap();

        let out = list(env.config(), ListArgs::new(ListFormat::Csv)).unwrap();
        assert_eq!(
            out.message(),
            "Description,Amount,Category\n\"Lunch, with tip\",21.00,Food\n"
        );
    }

    #[test]
    fn test_total() {
        let env = TestEnv::new();
        env.insert_sample_expenses();
        let out = total(env.config()).unwrap();
        assert_eq!(out.message(), "Total Expenses: 112.50");
    }

    #[test]
    fn test_total_empty() {
        let env = TestEnv::new();
        let out = total(env.config()).unwrap();
        assert_eq!(out.message(), "Total Expenses: 0.00");
    }

    #[test]
    fn test_categories() {
        let env = TestEnv::new();
        let out = categories(env.config()).unwrap();
        assert_eq!(
            out.message(),
            "Food (default)\nTransportation\nEntertainment\nUtilities\nOther"
        );
        assert_eq!(out.structure().unwrap().len(), 5);
    }
}
