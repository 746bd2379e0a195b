/// Reader and writer options for delimited artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvSettings {
    /// Field separator. Must be ASCII; the underlying reader and writer
    /// operate on a single byte.
    pub delimiter: char,
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings { delimiter: ',' }
    }
}
