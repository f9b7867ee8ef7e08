//! Database operations for the `stores` table.

mod read;
mod types;
mod write;

pub use read::list_stores;
pub use types::StoreRow;
pub use write::insert_store;
