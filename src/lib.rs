pub mod error;
pub mod flatten;
pub mod parser;
pub mod reader;
pub mod samples;
pub mod table;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use flatten::{FlattenOptions, Flattener};
pub use reader::{count_comments, Header, VcfLines, VcfReader};
pub use samples::{FinalTable, SampleBlock};
pub use table::Table;
pub use types::{FlagPolicy, MalformedPolicy, Record, Value};
