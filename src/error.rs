use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not set up decompression: {0}")]
    Compression(#[from] niffler::Error),

    /// A data line with fewer than the 8 mandatory tab-separated columns.
    #[error("line {line}: expected at least 8 tab-separated fields (CHROM..INFO), found {fields}")]
    MalformedLine { line: usize, fields: usize },

    #[error("no '#CHROM' header line precedes the data, sample columns cannot be named")]
    MissingHeader,

    #[error("header line has no FORMAT column, cannot locate the sample columns")]
    MissingFormat,

    #[error("FORMAT is column {position}, expected it directly after INFO (column 9)")]
    MisplacedFormat { position: usize },

    /// An INFO key named like the index column, `FORMAT` or a sample.
    #[error("INFO key '{0}' clashes with the index column or a column of the sample header")]
    DuplicateColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error concerns the column layout of the file rather than I/O or a single line.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::MissingHeader
                | Error::MissingFormat
                | Error::MisplacedFormat { .. }
                | Error::DuplicateColumn(_)
        )
    }
}
