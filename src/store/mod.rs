pub mod backend;
pub mod engine;
pub mod json;
pub mod log;
pub mod record;
pub mod sqlite;

pub use engine::StorageEngine;
pub use record::Record;
