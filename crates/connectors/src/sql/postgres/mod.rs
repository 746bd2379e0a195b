pub mod adapter;
pub mod config;
pub mod params;
pub mod transaction;
mod utils;

pub use adapter::PgAdapter;
pub use config::{ConnectionParams, TlsMode};
pub use transaction::{PgTransaction, Prepared};
