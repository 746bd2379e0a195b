pub mod error;
pub mod records;
pub mod schema;
pub mod table;
