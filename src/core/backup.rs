//! Full-store snapshots: write, compress, read back, restore.

use crate::core::events::{DomainEvent, EventBus};
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::Snapshot;
use crate::store::engine::StorageEngine;
use crate::ui::messages::{confirm, info, success, warning};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write a snapshot of the whole store as pretty-printed JSON,
    /// optionally compressed into a zip archive next to it.
    pub fn backup(
        engine: &mut StorageEngine,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<()> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !force {
            warning(format!("The file '{}' already exists.", dest.display()));
            if !confirm("Overwrite it?") {
                info("Backup cancelled.");
                return Ok(());
            }
        }

        let snapshot = engine.backup()?;
        fs::write(dest, serde_json::to_string_pretty(&snapshot)?)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let zipped = compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            zipped
        } else {
            dest.to_path_buf()
        };

        engine.oplog(
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Snapshot written and compressed"
            } else {
                "Snapshot written"
            },
        )?;
        Ok(())
    }

    /// Parse a snapshot document. Anything without a `data` section is
    /// rejected before the store is touched.
    pub fn parse_snapshot(content: &str) -> AppResult<Snapshot> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| AppError::InvalidBackup(format!("not valid JSON: {}", e)))?;
        if value.get("data").is_none() {
            return Err(AppError::InvalidBackup(
                "missing 'data' section".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| AppError::InvalidBackup(e.to_string()))
    }

    /// Read a snapshot from a plain or zipped backup file.
    pub fn read_snapshot(src_file: &str) -> AppResult<Snapshot> {
        let path = Path::new(src_file);
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Backup file not found: {}", path.display()),
            )
            .into());
        }

        let content = if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        {
            read_zipped(path)?
        } else {
            fs::read_to_string(path)?
        };
        Self::parse_snapshot(&content)
    }

    /// Replace the store contents with a snapshot read from disk.
    pub fn restore(
        engine: &mut StorageEngine,
        bus: &EventBus,
        src_file: &str,
    ) -> AppResult<Snapshot> {
        let snapshot = Self::read_snapshot(src_file)?;
        engine.restore(&snapshot)?;
        bus.publish(&DomainEvent::DataRestored);
        Ok(snapshot)
    }
}

/// Zip a written backup file in place, returning the archive path.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup.json".to_string());
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    let mut src = fs::File::open(path)?;
    std::io::copy(&mut src, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed backup: {}", zip_path.display()));
    Ok(zip_path)
}

/// First entry of a zip archive, read as UTF-8 text.
fn read_zipped(path: &Path) -> AppResult<String> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(std::io::Error::other)?;
    let mut inner = archive.by_index(0).map_err(std::io::Error::other)?;
    let mut content = String::new();
    inner.read_to_string(&mut content)?;
    Ok(content)
}
