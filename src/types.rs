use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use strum::{Display, EnumString};

/// The 7 leading VCF columns, in file order. INFO is not listed since it is expanded into
/// one column per key.
pub const FIXED_COLUMNS: [&str; 7] = ["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER"];

/// Number of mandatory tab-separated fields on a data line (CHROM through INFO).
pub const MANDATORY_FIELDS: usize = 8;

/// Raw field values that denote a missing value.
pub(crate) const NULL_VALUES: [&str; 3] = ["", ".", "NA"];

/// Cell value of a flattened VCF column.
///
/// Values are kept as text; no numeric or boolean coercion happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Scalar(String),
    List(Vec<String>),
    /// A bare INFO flag (e.g. `DB`), only produced with [`FlagPolicy::Retain`].
    Flag,
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn flag(&self) -> bool {
        matches!(self, Value::Flag)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_owned())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::List(v.into_iter().map(str::to_owned).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Scalar(s) => f.write_str(s),
            Value::List(v) => write!(f, "{}", v.iter().join(",")),
            Value::Flag => f.write_str("true"),
        }
    }
}

/// One parsed data line: the fixed columns followed by INFO keys in encounter order.
pub type Record = IndexMap<String, Value>;

/// What to do with INFO entries that carry no `=` (presence-only flags such as `DB`).
#[derive(Debug, Clone, Copy, Eq, PartialEq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FlagPolicy {
    Drop,
    Retain,
}

impl Default for FlagPolicy {
    fn default() -> Self {
        FlagPolicy::Drop
    }
}

/// What to do with data lines that have fewer than [`MANDATORY_FIELDS`] columns.
#[derive(Debug, Clone, Copy, Eq, PartialEq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MalformedPolicy {
    Abort,
    Skip,
}

impl Default for MalformedPolicy {
    fn default() -> Self {
        MalformedPolicy::Abort
    }
}
