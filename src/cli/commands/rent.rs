use crate::cli::parser::{Commands, RentAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::engine::StorageEngine;
use crate::ui::messages::success;
use crate::utils::formatting;

/// Handle the `rent` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rent { action } = cmd {
        let mut engine = StorageEngine::open(cfg)?;

        match action {
            RentAction::Show => {
                let rent = engine.rent_settings()?;
                println!(
                    "🏠 Rent: {} due on day {} of each month",
                    formatting::format_money(rent.amount, &cfg.default_currency),
                    rent.day,
                );
            }

            RentAction::Set { amount, day } => {
                let mut rent = engine.rent_settings()?;
                if let Some(amount) = amount {
                    if *amount < 0.0 {
                        return Err(AppError::Validation(
                            "rent amount cannot be negative".to_string(),
                        ));
                    }
                    rent.amount = *amount;
                }
                if let Some(day) = day {
                    if !(1..=31).contains(day) {
                        return Err(AppError::Validation(
                            "rent day must be between 1 and 31".to_string(),
                        ));
                    }
                    rent.day = *day;
                }
                engine.put_rent_settings(&rent)?;
                engine.oplog(
                    "edit",
                    "rent",
                    &format!("Rent set to {} due day {}", rent.amount, rent.day),
                )?;

                success(format!(
                    "Rent set to {} due on day {}",
                    formatting::format_money(rent.amount, &cfg.default_currency),
                    rent.day,
                ));
            }
        }
    }
    Ok(())
}
