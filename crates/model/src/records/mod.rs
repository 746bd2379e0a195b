pub mod header;
pub mod row;
pub mod set;

pub use header::Header;
pub use row::Record;
pub use set::RecordSet;
