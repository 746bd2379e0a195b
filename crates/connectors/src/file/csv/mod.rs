pub mod error;
pub mod settings;
pub mod sink;
pub mod source;

pub use error::FileError;
pub use settings::CsvSettings;
pub use sink::CsvSink;
pub use source::CsvSource;
