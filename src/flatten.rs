use std::io::BufRead;
use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::parser::RecordParser;
use crate::reader::VcfReader;
use crate::samples::{FinalTable, SampleBlock};
use crate::table::Table;
use crate::types::{FlagPolicy, MalformedPolicy, FIXED_COLUMNS};

#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    pub flags: FlagPolicy,
    pub on_malformed: MalformedPolicy,
    /// Keep INFO as a single unsplit field, i.e. emit only the fixed columns before `FORMAT`.
    pub fixed_only: bool,
}

/// Runs a whole file through parsing, column union, sample join and genotype reduction.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    options: FlattenOptions,
}

impl Flattener {
    pub fn new(options: FlattenOptions) -> Self {
        Self { options }
    }

    /// # Examples
    ///
    /// ```
    /// use vcf_flatten::{Flattener, Value};
    ///
    /// let table = Flattener::default().flatten_path("resources/example.vcf").unwrap();
    /// assert_eq!(table.len(), 3);
    /// assert_eq!(table.samples(), ["HG001", "HG002"]);
    /// assert_eq!(table.get(0, "HG001"), Some(&Value::Scalar("0/1".into())));
    /// ```
    pub fn flatten_path<P: AsRef<Path>>(&self, path: P) -> Result<FinalTable> {
        let path = path.as_ref();
        info!("reading {}", path.display());
        self.flatten(VcfReader::from_path(path)?)
    }

    /// Nothing is returned unless every line was read, so a failure never yields a partial table.
    pub fn flatten<R: BufRead>(&self, reader: VcfReader<R>) -> Result<FinalTable> {
        let parser = RecordParser {
            flags: self.options.flags,
            expand_info: !self.options.fixed_only,
        };
        // fail on the header before touching any data
        let mut samples = SampleBlock::from_header(reader.header())?;
        info!(
            "{} comment lines, {} samples",
            reader.header().comment_count(),
            samples.samples().len()
        );

        let mut table = Table::with_columns(FIXED_COLUMNS.iter().copied());
        let mut skipped = 0;
        for line in reader {
            let (line_no, line) = line?;
            match parser.parse(line_no, &line) {
                Ok(record) => {
                    table.push(record);
                    samples.push_line(&line);
                }
                Err(e @ Error::MalformedLine { .. })
                    if self.options.on_malformed == MalformedPolicy::Skip =>
                {
                    warn!("skipping: {}", e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            "parsed {} records into {} columns, skipped {} lines",
            table.len(),
            table.columns().len(),
            skipped
        );

        let mut merged = FinalTable::merge(table, samples)?;
        merged.reduce_genotypes();
        Ok(merged)
    }
}
