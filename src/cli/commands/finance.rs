use crate::cli::parser::{Commands, FinanceAction};
use crate::config::Config;
use crate::core::finance::{FinanceFilter, FinanceLogic, FinancePatch};
use crate::errors::{AppError, AppResult};
use crate::models::finance::FinanceKind;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{info, success};
use crate::utils::{formatting, table::Table};

use super::{parse_person_filter, resolve_date, standard_bus};

fn parse_kind(code: &str) -> AppResult<FinanceKind> {
    FinanceKind::from_code(code).ok_or_else(|| AppError::InvalidKind(code.to_string()))
}

/// Handle the `finance` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Finance { action } = cmd {
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        match action {
            FinanceAction::Add {
                kind,
                description,
                amount,
                currency,
                date,
                category,
                person,
            } => {
                let record = FinanceLogic::add(
                    &mut engine,
                    &bus,
                    parse_kind(kind)?,
                    description,
                    *amount,
                    currency.as_deref().unwrap_or(&cfg.default_currency),
                    &resolve_date(date.as_deref())?,
                    category,
                    parse_person_filter(person.as_deref())?,
                )?;

                success(format!(
                    "{} recorded: '{}' {}",
                    record.kind,
                    record.description,
                    formatting::format_money(record.amount, &record.currency),
                ));
                println!("🆔 Id: {}", record.id);
            }

            FinanceAction::List {
                kind,
                person,
                from,
                to,
            } => {
                let filter = FinanceFilter {
                    kind: kind.as_deref().map(parse_kind).transpose()?,
                    person: parse_person_filter(person.as_deref())?,
                    from: from.clone(),
                    to: to.clone(),
                };
                let records = FinanceLogic::list(&mut engine, &filter)?;

                if records.is_empty() {
                    info("No finance records found.");
                    return Ok(());
                }

                let mut table = Table::new(&[
                    "Date", "Kind", "Description", "Amount", "Category", "Person", "Id",
                ]);
                let mut income = 0.0;
                let mut expenses = 0.0;
                for rec in &records {
                    match rec.kind {
                        FinanceKind::Income => income += rec.amount,
                        FinanceKind::Expense => expenses += rec.amount,
                    }
                    table.add_row(vec![
                        rec.date.clone(),
                        rec.kind.to_string(),
                        rec.description.clone(),
                        formatting::format_money(rec.amount, &rec.currency),
                        rec.category.clone(),
                        rec.person.map(|p| p.to_string()).unwrap_or_default(),
                        rec.id.clone(),
                    ]);
                }

                println!("{}", table.render());
                println!(
                    "Σ income {}, expenses {}, balance {}",
                    formatting::format_money(income, &cfg.default_currency),
                    formatting::format_money(expenses, &cfg.default_currency),
                    formatting::format_money(income - expenses, &cfg.default_currency),
                );
            }

            FinanceAction::Edit {
                id,
                kind,
                description,
                amount,
                currency,
                date,
                category,
                person,
            } => {
                let patch = FinancePatch {
                    kind: kind.as_deref().map(parse_kind).transpose()?,
                    description: description.clone(),
                    amount: *amount,
                    currency: currency.clone(),
                    date: date.clone(),
                    category: category.clone(),
                    person: parse_person_filter(person.as_deref())?,
                };
                let record = FinanceLogic::edit(&mut engine, &bus, id, &patch)?;
                success(format!("Finance record {} updated", record.id));
            }

            FinanceAction::Del { id } => {
                FinanceLogic::delete(&mut engine, &bus, id)?;
                success(format!("Finance record {} deleted", id));
            }
        }
    }
    Ok(())
}
