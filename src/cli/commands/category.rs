use crate::cli::parser::{CategoryAction, CategoryKindCmd, Commands};
use crate::config::Config;
use crate::core::categories::CategoryLogic;
use crate::errors::AppResult;
use crate::models::settings::CategoryKind;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{info, success, warning};

use super::standard_bus;

/// Handle the `category` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Category { kind } = cmd {
        let (kind, action) = match kind {
            CategoryKindCmd::Task { action } => (CategoryKind::Task, action),
            CategoryKindCmd::Expense { action } => (CategoryKind::Expense, action),
        };

        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();

        match action {
            CategoryAction::Add { name } => {
                if CategoryLogic::add(&mut engine, &bus, kind, name)? {
                    success(format!("{} category '{}' added", kind.label(), name));
                } else {
                    info(format!("{} category '{}' already exists", kind.label(), name));
                }
            }

            CategoryAction::Del { name } => {
                if CategoryLogic::remove(&mut engine, &bus, kind, name)? {
                    success(format!("{} category '{}' removed", kind.label(), name));
                } else {
                    warning(format!("No {} category named '{}'", kind.label(), name));
                }
            }

            CategoryAction::List => {
                let names = CategoryLogic::list(&engine, kind)?;
                if names.is_empty() {
                    info(format!("No {} categories registered.", kind.label()));
                } else {
                    println!("📋 {} categories:", kind.label());
                    for name in names {
                        println!("  - {}", name);
                    }
                }
            }
        }
    }
    Ok(())
}
