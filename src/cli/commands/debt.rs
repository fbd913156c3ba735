use crate::cli::parser::{Commands, DebtAction};
use crate::config::Config;
use crate::core::debt::{DebtLogic, DebtPatch};
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::{formatting, table::Table};

use super::{parse_person_filter, resolve_person, standard_bus};

/// Handle the `debt` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Debt { action } = cmd {
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        match action {
            DebtAction::Add {
                person,
                description,
                amount,
                currency,
            } => {
                let person = resolve_person(person.as_deref(), cfg)?;
                let debt = DebtLogic::add(
                    &mut engine,
                    &bus,
                    person,
                    description,
                    *amount,
                    currency.as_deref().unwrap_or(&cfg.default_currency),
                )?;

                success(format!(
                    "Debt recorded: {} owes {} for '{}'",
                    debt.person,
                    formatting::format_money(debt.amount, &debt.currency),
                    debt.description,
                ));
                println!("🆔 Id: {}", debt.id);
            }

            DebtAction::List { person, open } => {
                let debts = DebtLogic::list(
                    &mut engine,
                    parse_person_filter(person.as_deref())?,
                    *open,
                )?;

                if debts.is_empty() {
                    info("No debts found.");
                    return Ok(());
                }

                let mut table = Table::new(&[
                    "Person", "Description", "Amount", "Paid", "Remaining", "Id",
                ]);
                for debt in &debts {
                    table.add_row(vec![
                        debt.person.to_string(),
                        debt.description.clone(),
                        formatting::format_money(debt.amount, &debt.currency),
                        formatting::format_money(debt.paid, &debt.currency),
                        formatting::format_money(debt.remaining(), &debt.currency),
                        debt.id.clone(),
                    ]);
                }
                println!("{}", table.render());
            }

            DebtAction::Edit {
                id,
                person,
                description,
                amount,
                currency,
            } => {
                let patch = DebtPatch {
                    person: parse_person_filter(person.as_deref())?,
                    description: description.clone(),
                    amount: *amount,
                    currency: currency.clone(),
                };
                let debt = DebtLogic::edit(&mut engine, &bus, id, &patch)?;
                success(format!("Debt {} updated", debt.id));
            }

            DebtAction::Del { id, yes } => {
                let payments = DebtLogic::linked_payments(&mut engine, id)?;
                if !payments.is_empty() && !*yes {
                    warning(format!(
                        "This debt has {} linked payment(s) that will be deleted with it.",
                        payments.len()
                    ));
                    if !confirm("Delete the debt and its payments?") {
                        info("Delete cancelled.");
                        return Ok(());
                    }
                }

                let removed = DebtLogic::delete(&mut engine, &bus, id)?;
                success(format!(
                    "Debt {} deleted together with {} payment(s)",
                    id, removed
                ));
            }
        }
    }
    Ok(())
}
