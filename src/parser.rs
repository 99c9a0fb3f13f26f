use itertools::Itertools;
use log::debug;
use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::combinator::opt;
use nom::sequence::{preceded, tuple};
use nom::IResult;

use crate::error::{Error, Result};
use crate::types::{FlagPolicy, Record, Value, FIXED_COLUMNS, MANDATORY_FIELDS, NULL_VALUES};

const INFO_COLUMN: usize = 7;

/// Classify a raw field as null, list or scalar.
///
/// `""`, `"."` and `"NA"` are null. Anything containing a comma is split on commas, and the
/// elements are kept verbatim (`"1,."` is `["1", "."]`). Everything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use vcf_flatten::parser::interpret;
/// use vcf_flatten::Value;
///
/// assert_eq!(interpret("."), Value::Null);
/// assert_eq!(interpret("0.5,0.3"), Value::List(vec!["0.5".into(), "0.3".into()]));
/// assert_eq!(interpret("PASS"), Value::Scalar("PASS".into()));
/// ```
pub fn interpret(raw: &str) -> Value {
    if NULL_VALUES.contains(&raw) {
        Value::Null
    } else if raw.contains(',') {
        Value::List(raw.split(',').map(str::to_owned).collect())
    } else {
        Value::Scalar(raw.to_owned())
    }
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) enum InfoEntry<'a> {
    Pair(&'a str, &'a str),
    Flag(&'a str),
    Malformed(&'a str),
}

/// `key=value` (the key may be empty), a bare `key`, or anything with more than one `=`.
fn info_entry(input: &str) -> IResult<&str, InfoEntry> {
    let (rest, (key, value)) = tuple((
        take_till(|c: char| c == '='),
        opt(preceded(char('='), take_till(|c: char| c == '='))),
    ))(input)?;
    let entry = match value {
        _ if !rest.is_empty() => InfoEntry::Malformed(input),
        Some(value) => InfoEntry::Pair(key, value),
        None => InfoEntry::Flag(key),
    };
    Ok((rest, entry))
}

pub(crate) fn info_entries<'a>(info: &'a str) -> impl Iterator<Item = InfoEntry<'a>> + 'a {
    info.split(';').map(|entry| {
        info_entry(entry)
            .map(|(_, e)| e)
            .unwrap_or(InfoEntry::Malformed(entry))
    })
}

/// Turns single VCF data lines into [`Record`]s.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    pub flags: FlagPolicy,
    /// When unset, INFO is not split and records only hold the fixed columns.
    pub expand_info: bool,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self {
            flags: FlagPolicy::default(),
            expand_info: true,
        }
    }
}

impl RecordParser {
    pub fn new(flags: FlagPolicy) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    /// Parse a non-comment line. `line_no` is only used for error reporting.
    pub fn parse(&self, line_no: usize, line: &str) -> Result<Record> {
        let fields = line.trim_end().split('\t').collect_vec();
        if fields.len() < MANDATORY_FIELDS {
            return Err(Error::MalformedLine {
                line: line_no,
                fields: fields.len(),
            });
        }

        let mut record = Record::with_capacity(FIXED_COLUMNS.len());
        for (column, raw) in FIXED_COLUMNS.iter().zip(&fields) {
            record.insert((*column).to_owned(), interpret(raw));
        }
        if !self.expand_info {
            return Ok(record);
        }

        for entry in info_entries(fields[INFO_COLUMN]) {
            match entry {
                InfoEntry::Pair(key, value) => {
                    record.insert(key.to_owned(), interpret(value));
                }
                InfoEntry::Flag(key) if self.flags == FlagPolicy::Retain => {
                    // an INFO field of "." or a trailing ';' is not a flag
                    if !NULL_VALUES.contains(&key) {
                        record.insert(key.to_owned(), Value::Flag);
                    }
                }
                InfoEntry::Flag(key) => {
                    debug!("line {}: dropping INFO flag '{}'", line_no, key);
                }
                InfoEntry::Malformed(entry) => {
                    debug!("line {}: dropping malformed INFO entry '{}'", line_no, entry);
                }
            }
        }
        Ok(record)
    }
}

/// Parse a single data line with the default options (flags dropped, INFO expanded).
///
/// # Examples
///
/// ```
/// use vcf_flatten::parser::parse;
/// use vcf_flatten::Value;
///
/// let record = parse("chr1\t100\trs1\tA\tT\t50\tPASS\tDP=10;AF=0.5,0.3;DB").unwrap();
/// assert_eq!(record.keys().collect::<Vec<_>>(),
///            ["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "DP", "AF"]);
/// assert_eq!(record["AF"], Value::List(vec!["0.5".into(), "0.3".into()]));
/// ```
pub fn parse(line: &str) -> Result<Record> {
    RecordParser::default().parse(1, line)
}
