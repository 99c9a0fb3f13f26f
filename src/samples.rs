use getset::Getters;
use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::reader::Header;
use crate::table::Table;
use crate::types::{Value, MANDATORY_FIELDS};

pub const FORMAT_COLUMN: &str = "FORMAT";

/// Name of the leading row-number column in the written table.
pub const INDEX_COLUMN: &str = "";

/// The `FORMAT` column and the per-sample columns after it, cells kept verbatim.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct SampleBlock {
    /// `FORMAT` followed by the sample names.
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl SampleBlock {
    /// Locate `FORMAT` in the header row; it has to sit directly after `INFO`.
    pub fn from_header(header: &Header) -> Result<Self> {
        let columns = header.columns();
        if columns.is_empty() {
            return Err(Error::MissingHeader);
        }
        let position = columns
            .iter()
            .position(|c| c == FORMAT_COLUMN)
            .ok_or(Error::MissingFormat)?;
        if position != MANDATORY_FIELDS {
            return Err(Error::MisplacedFormat {
                position: position + 1,
            });
        }
        Ok(Self {
            columns: columns[position..].to_vec(),
            rows: Vec::new(),
        })
    }

    /// Take the cells from column 9 onwards of a data line. Missing cells are null, cells beyond
    /// the last named sample are dropped.
    pub fn push_line(&mut self, line: &str) {
        let mut row = line
            .trim_end()
            .split('\t')
            .skip(MANDATORY_FIELDS)
            .map(|cell| match cell {
                "" => Value::Null,
                cell => Value::Scalar(cell.to_owned()),
            })
            .collect_vec();
        if row.len() > self.columns.len() {
            debug!(
                "dropping {} cells without a sample name",
                row.len() - self.columns.len()
            );
        }
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn samples(&self) -> &[String] {
        &self.columns[1..]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The genotype call of a sample cell: everything before the first `:`.
///
/// # Examples
///
/// ```
/// use vcf_flatten::samples::genotype_call;
///
/// assert_eq!(genotype_call("0/1:35,10:45:99"), "0/1");
/// assert_eq!(genotype_call("./."), "./.");
/// ```
pub fn genotype_call(cell: &str) -> &str {
    cell.split_once(':').map_or(cell, |(gt, _)| gt)
}

/// Fixed, INFO and sample columns side by side.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct FinalTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    /// Position of `FORMAT` in `columns`; every later column is a sample.
    format_index: usize,
}

impl FinalTable {
    /// Join `samples` to the right of `table`, row `i` to row `i`.
    ///
    /// Rows of `table` without a sample row get nulls, surplus sample rows are ignored.
    /// An INFO key named like the index column, `FORMAT` or a sample is a [`Error::DuplicateColumn`].
    pub fn merge(table: Table, samples: SampleBlock) -> Result<Self> {
        if table.column_index(INDEX_COLUMN).is_some() {
            return Err(Error::DuplicateColumn(INDEX_COLUMN.to_owned()));
        }
        if let Some(duplicate) = samples
            .columns
            .iter()
            .find(|c| table.column_index(c).is_some())
        {
            return Err(Error::DuplicateColumn(duplicate.clone()));
        }
        if table.len() != samples.len() {
            debug!(
                "joining {} rows with {} sample rows",
                table.len(),
                samples.len()
            );
        }

        let (info_columns, info_rows) = table.into_parts();
        let format_index = info_columns.len();
        let width = format_index + samples.columns.len();
        let mut sample_rows = samples.rows.into_iter();
        let rows = info_rows
            .into_iter()
            .map(|mut row| {
                row.reserve(width - format_index);
                match sample_rows.next() {
                    Some(cells) => row.extend(cells),
                    None => row.resize(width, Value::Null),
                }
                row
            })
            .collect();
        let columns = info_columns.into_iter().chain(samples.columns).collect();

        Ok(Self {
            columns,
            rows,
            format_index,
        })
    }

    pub fn samples(&self) -> &[String] {
        &self.columns[self.format_index + 1..]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Cut every sample cell down to its genotype call. Fixed, INFO and `FORMAT` cells are
    /// left alone. Applying this twice is the same as applying it once.
    pub fn reduce_genotypes(&mut self) {
        let first_sample = self.format_index + 1;
        for row in self.rows.iter_mut() {
            for cell in row[first_sample..].iter_mut() {
                if let Value::Scalar(s) = cell {
                    let len = genotype_call(s).len();
                    s.truncate(len);
                }
            }
        }
    }
}
