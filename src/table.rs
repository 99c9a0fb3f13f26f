use std::iter::FromIterator;

use getset::Getters;
use indexmap::IndexSet;
use log::trace;

use crate::types::{Record, Value};

/// Rectangular store built from records with differing key sets.
///
/// Columns are assigned an index the first time their key is seen and never move. Rows that
/// were pushed before a column existed are back-filled with [`Value::Null`].
///
/// # Examples
///
/// ```
/// use vcf_flatten::parser::parse;
/// use vcf_flatten::{Table, Value};
///
/// let mut table = Table::new();
/// table.push(parse("chr1\t1\t.\tA\tC\t.\tPASS\tDP=10").unwrap());
/// table.push(parse("chr1\t2\t.\tA\tC\t.\tPASS\tDP=10;AC=2").unwrap());
///
/// assert_eq!(table.columns().iter().skip(7).collect::<Vec<_>>(), ["DP", "AC"]);
/// assert_eq!(table.get(0, "AC"), Some(&Value::Null));
/// assert_eq!(table.get(1, "AC"), Some(&Value::Scalar("2".into())));
/// ```
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct Table {
    columns: IndexSet<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table whose first columns are fixed up front, so they exist even without rows.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append `record` as a row, registering any key not seen so far.
    pub fn push(&mut self, record: Record) {
        let mut row = vec![Value::Null; self.columns.len()];
        for (key, value) in record {
            let (idx, inserted) = self.columns.insert_full(key);
            if inserted {
                trace!(
                    "new column '{}' at {}, back-filling {} rows",
                    self.columns[idx],
                    idx,
                    self.rows.len()
                );
                for prior in self.rows.iter_mut() {
                    prior.push(Value::Null);
                }
                row.push(Value::Null);
            }
            row[idx] = value;
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// All values of one column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    pub fn into_parts(self) -> (IndexSet<String>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }
}

impl Extend<Record> for Table {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, records: T) {
        for record in records {
            self.push(record);
        }
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<T: IntoIterator<Item = Record>>(records: T) -> Self {
        let mut table = Table::new();
        table.extend(records);
        table
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;
    use crate::types::FIXED_COLUMNS;
    use itertools::Itertools;

    fn line(info: &str) -> Record {
        parse(&format!("chr1\t1\t.\tA\tC\t.\tPASS\t{}", info)).unwrap()
    }

    #[test]
    fn test_late_column_is_backfilled() {
        let table: Table = vec![line("DP=10"), line("DP=10;AC=2")].into_iter().collect();
        assert_eq!(
            table.columns().iter().skip(FIXED_COLUMNS.len()).collect_vec(),
            ["DP", "AC"]
        );
        assert_eq!(table.get(0, "AC"), Some(&Value::Null));
        assert_eq!(table.get(1, "AC"), Some(&Value::from("2")));
    }

    #[test]
    fn test_missing_column_is_null() {
        let table: Table = vec![line("DP=10;AC=2"), line("NS=3")].into_iter().collect();
        assert_eq!(
            table.column("DP").unwrap().cloned().collect_vec(),
            [Value::from("10"), Value::Null]
        );
        assert_eq!(
            table.column("NS").unwrap().cloned().collect_vec(),
            [Value::Null, Value::from("3")]
        );
    }

    #[test]
    fn test_rectangular() {
        let table: Table = vec![
            line("A=1"),
            line("."),
            line("B=1;A=2"),
            line("C=1,2;D=."),
            line("A=3"),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 5);
        assert!(table
            .rows()
            .iter()
            .all(|row| row.len() == table.columns().len()));
        assert_eq!(
            table.columns().iter().skip(FIXED_COLUMNS.len()).collect_vec(),
            ["A", "B", "C", "D"]
        );
        // the only D entry is "." and no other row has the key
        assert!(table.column("D").unwrap().all(Value::is_null));
        assert_eq!(table.get(3, "C"), Some(&Value::from(vec!["1", "2"])));
    }

    #[test]
    fn test_column_order_is_first_seen() {
        // a later row with a different INFO order does not reorder columns
        let table: Table = vec![line("X=1;Y=2"), line("Y=3;X=4;Z=5")].into_iter().collect();
        assert_eq!(
            table.columns().iter().skip(FIXED_COLUMNS.len()).collect_vec(),
            ["X", "Y", "Z"]
        );
        assert_eq!(table.get(1, "X"), Some(&Value::from("4")));
    }

    #[test]
    fn test_unknown_lookup() {
        let table: Table = vec![line("DP=1")].into_iter().collect();
        assert_eq!(table.get(0, "AC"), None);
        assert_eq!(table.get(1, "DP"), None);
        assert!(table.column("AC").is_none());
        assert!(Table::new().is_empty());
    }

    #[test]
    fn test_with_columns() {
        let mut table = Table::with_columns(FIXED_COLUMNS.iter().copied());
        assert_eq!(table.columns().len(), FIXED_COLUMNS.len());
        table.push(line("DP=1"));
        assert_eq!(
            table.columns().iter().collect_vec(),
            ["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "DP"]
        );
    }
}
