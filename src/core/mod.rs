pub mod backup;
pub mod categories;
pub mod debt;
pub mod events;
pub mod finance;
pub mod oplog;
pub mod rates;
pub mod summary;
pub mod timer;
pub mod work;
