//! Local SQLite storage for scored results and raw log uploads.

mod results;

pub use results::{ResultStore, StoredResult};
