use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap());

/// Remove ANSI escape sequences so padding can work on visible width.
fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "backup" => Colour::Blue,
        "restore" | "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("timer_") => Colour::Cyan,
        _ => Colour::White,
    }
}

fn op_label(operation: &str, target: &str) -> String {
    if target.is_empty() {
        operation.to_string()
    } else {
        format!("{} ({})", operation, target)
    }
}

pub struct OplogLogic;

impl OplogLogic {
    /// Print the operation log, oldest entry first.
    pub fn print(engine: &StorageEngine) -> AppResult<()> {
        let entries = engine.log_entries()?;
        if entries.is_empty() {
            info("Operation log is empty.");
            return Ok(());
        }

        let mut rows = Vec::new();
        for entry in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| entry.date.clone());
            let mut label = op_label(&entry.operation, &entry.target);
            if label.chars().count() > 60 {
                label = label.chars().take(57).collect::<String>() + "...";
            }
            rows.push((entry.id, date, entry.operation.clone(), label, entry.message.clone()));
        }

        let id_w = rows
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows.iter().map(|(_, d, ..)| d.len()).max().unwrap_or(10);
        let label_w = rows
            .iter()
            .map(|(_, _, _, label, _)| label.chars().count())
            .max()
            .unwrap_or(10);

        println!("📜 Operation log:\n");
        for (id, date, operation, label, message) in rows {
            let colored = match label.split_once(' ') {
                // color only the operation word, the target stays plain
                Some((op, rest)) => {
                    format!("{} {}", color_for_operation(&operation).paint(op), rest)
                }
                None => color_for_operation(&operation).paint(label.as_str()).to_string(),
            };
            let visible = strip_ansi(&colored).chars().count();
            let padding = " ".repeat(label_w.saturating_sub(visible));
            println!("{:>id_w$}: {:<date_w$} | {}{} => {}", id, date, colored, padding, message);
        }
        Ok(())
    }
}
