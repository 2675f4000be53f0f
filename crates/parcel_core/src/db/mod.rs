//! Connection opening and parcel schema bootstrap.
//!
//! Every connection handed out here has passed `schema::ensure_schema`, so
//! `SqliteParcelRepository::try_new` succeeds on it.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, open_db_with_config};
