use crate::cli::parser::{Commands, PaymentAction};
use crate::config::Config;
use crate::core::debt::DebtLogic;
use crate::core::finance::FinanceLogic;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{info, success};
use crate::utils::{formatting, table::Table};

use super::{parse_person_filter, standard_bus};

/// Handle the `payment` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Payment { action } = cmd {
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        match action {
            PaymentAction::Add { debt, amount, date } => {
                let payment =
                    DebtLogic::add_payment(&mut engine, &bus, debt, *amount, date.as_deref())?;

                success(format!(
                    "Payment recorded: {} on {}",
                    formatting::format_money(payment.amount, &payment.currency),
                    payment.date,
                ));
                println!("🆔 Id: {}", payment.id);
            }

            PaymentAction::Edit { id, amount, debt } => {
                let payment =
                    DebtLogic::edit_payment(&mut engine, &bus, id, *amount, debt.as_deref())?;
                success(format!(
                    "Payment {} is now {}",
                    payment.id,
                    formatting::format_money(payment.amount, &payment.currency),
                ));
            }

            PaymentAction::Del { id } => {
                // payment-aware delete releases the amount from the debt
                FinanceLogic::delete(&mut engine, &bus, id)?;
                success(format!("Payment {} deleted", id));
            }

            PaymentAction::Debts { person } => {
                let debts = DebtLogic::list(
                    &mut engine,
                    parse_person_filter(person.as_deref())?,
                    true,
                )?;

                if debts.is_empty() {
                    info("No open debts.");
                    return Ok(());
                }

                let mut table = Table::new(&["Person", "Description", "Remaining", "Id"]);
                for debt in &debts {
                    table.add_row(vec![
                        debt.person.to_string(),
                        debt.description.clone(),
                        formatting::format_money(debt.remaining(), &debt.currency),
                        debt.id.clone(),
                    ]);
                }
                println!("{}", table.render());
            }
        }
    }
    Ok(())
}
