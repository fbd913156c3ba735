use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::engine::StorageEngine;
use crate::ui::messages::error;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (or the JSON fallback store)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
    } else {
        Config::init_all(None, cli.test)?;
    }

    println!("⚙️  Initializing rHousebook…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    //
    // Opening the engine creates the schema, seeds the default settings
    // documents and imports any legacy flat-file data.
    //
    let engine = StorageEngine::open(cfg)?;

    if let Err(e) = engine.oplog(
        "init",
        engine.backend_name(),
        &format!("Store initialized at {}", &cfg.database),
    ) {
        error(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rHousebook initialization completed!");
    Ok(())
}
