use crate::cli::parser::{Commands, TimerAction};
use crate::config::Config;
use crate::core::timer::{TimerLogic, TimerPhase, TimerStatus};
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{info, success, warning};
use crate::utils::{formatting, time};
use chrono::Local;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use super::{resolve_person, standard_bus};

/// Handle the `timer` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timer { action } = cmd {
        let mut engine = StorageEngine::open(cfg)?;
        let bus = standard_bus();
        let now = Local::now();

        match action {
            TimerAction::Start { person, activity } => {
                let person = resolve_person(person.as_deref(), cfg)?;
                let data =
                    TimerLogic::start(&mut engine, &bus, person, activity.as_deref(), now)?;
                success(format!("Timer running for {} on '{}'", person, data.activity));
            }

            TimerAction::Pause => {
                let status = TimerLogic::status(&engine, now)?;
                if status.phase != TimerPhase::Running {
                    warning("Timer is not running, nothing to pause.");
                } else {
                    TimerLogic::pause(&mut engine, &bus, now)?;
                    success("Timer paused.");
                }
            }

            TimerAction::Stop { note } => {
                match TimerLogic::stop(&mut engine, &bus, note.as_deref().unwrap_or(""), now)? {
                    Some(log) => {
                        success(format!(
                            "Timer stopped: {} recorded for {}",
                            formatting::mins2readable(log.worked),
                            log.person
                        ));
                        println!("🆔 Id: {}", log.id);
                    }
                    None => warning("Timer was not started, nothing recorded."),
                }
            }

            TimerAction::Status { watch } => {
                if *watch {
                    watch_status(&engine)?;
                } else {
                    let status = TimerLogic::status(&engine, now)?;
                    print_status(&status);
                }
            }
        }
    }
    Ok(())
}

/// Re-read the persisted state every second and refresh the elapsed line.
/// The loop only reads; it ends on its own once the timer is paused or
/// stopped from another invocation.
fn watch_status(engine: &StorageEngine) -> AppResult<()> {
    let mut refreshed = false;
    loop {
        let status = TimerLogic::status(engine, Local::now())?;
        if status.phase != TimerPhase::Running {
            if refreshed {
                println!();
            }
            print_status(&status);
            return Ok(());
        }

        print!("\r⏳ Elapsed : {}", time::format_hms(status.elapsed_ms));
        io::stdout().flush()?;
        refreshed = true;
        thread::sleep(Duration::from_secs(1));
    }
}

fn print_status(status: &TimerStatus) {
    match status.phase {
        TimerPhase::Idle => info("Timer is idle."),
        TimerPhase::Running | TimerPhase::Paused => {
            let label = if status.phase == TimerPhase::Running {
                "running"
            } else {
                "paused"
            };
            println!("⏱️  Timer {}", label);
            if let Some(person) = status.data.person {
                println!("👤 Person  : {}", person);
            }
            println!("🔨 Activity: {}", status.data.activity);
            println!("⏳ Elapsed : {}", time::format_hms(status.elapsed_ms));
        }
    }
}
