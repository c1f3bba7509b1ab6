use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// FieldValue – a single cell in a record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value as it appears in the yearly datasets.
/// Categorical columns carry `Text`, settlement amounts carry `Number`,
/// and `Null` marks a field the source row did not supply.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Null,
}

impl FieldValue {
    /// Whether the value counts as present for grouping and unique-value
    /// extraction. Empty strings and nulls are absent; numeric zero is a
    /// real value and stays present.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(_) => true,
            FieldValue::Null => false,
        }
    }

    /// Soft numeric interpretation: numbers pass through, numeric text is
    /// parsed, everything else (missing, malformed) degrades to 0.
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            FieldValue::Null => 0.0,
        }
    }

    /// Exact-equality check against a filter constraint. Text compares
    /// string-equal; numeric fields match when the constraint parses to the
    /// same number. `Null` never matches a non-empty constraint.
    pub fn matches(&self, constraint: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == constraint,
            FieldValue::Number(n) => constraint.trim().parse::<f64>() == Ok(*n),
            FieldValue::Null => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            FieldValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of a yearly dataset
// ---------------------------------------------------------------------------

/// A single settlement record: field name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Display text for a field; empty string when the field is absent.
    pub fn display(&self, field: &str) -> String {
        self.get(field).map(|v| v.to_string()).unwrap_or_default()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete collection for one year
// ---------------------------------------------------------------------------

/// The full ordered record collection for one year, with the column list
/// derived from the rows. Loaded once, read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<Record>,
    /// Column names in first-seen order across the records.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset from loaded records, collecting column names in the
    /// order they first appear.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names: Vec<String> = Vec::new();
        for rec in &records {
            for (col, _) in rec.fields() {
                if !column_names.iter().any(|c| c == col) {
                    column_names.push(col.clone());
                }
            }
        }
        Dataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn soft_parse_degrades_to_zero() {
        assert_eq!(FieldValue::Text("12.5".into()).as_number(), 12.5);
        assert_eq!(FieldValue::Text(" 7 ".into()).as_number(), 7.0);
        assert_eq!(FieldValue::Text("12abc".into()).as_number(), 0.0);
        assert_eq!(FieldValue::Text("".into()).as_number(), 0.0);
        assert_eq!(FieldValue::Null.as_number(), 0.0);
        assert_eq!(FieldValue::Number(3.0).as_number(), 3.0);
    }

    #[test]
    fn numeric_zero_is_present_but_empty_text_is_not() {
        assert!(FieldValue::Number(0.0).is_present());
        assert!(FieldValue::Text("x".into()).is_present());
        assert!(!FieldValue::Text("".into()).is_present());
        assert!(!FieldValue::Null.is_present());
    }

    #[test]
    fn record_set_and_display_round_trip() {
        let mut rec = Record::default();
        rec.set("isp", FieldValue::Text("Northlink".into()));
        rec.set("amount", FieldValue::Number(12.0));
        assert_eq!(rec.display("isp"), "Northlink");
        assert_eq!(rec.display("amount"), "12");
        assert_eq!(rec.display("missing"), "");
    }

    #[test]
    fn constraint_matching_is_type_aware() {
        assert!(FieldValue::Text("Acme".into()).matches("Acme"));
        assert!(!FieldValue::Text("Acme".into()).matches("acme"));
        assert!(FieldValue::Number(10.0).matches("10"));
        assert!(FieldValue::Number(10.0).matches("10.0"));
        assert!(!FieldValue::Number(10.0).matches("11"));
        assert!(!FieldValue::Null.matches("anything"));
    }

    #[test]
    fn dataset_collects_columns_in_first_seen_order() {
        let a: Record = [
            ("isp".to_string(), FieldValue::Text("A".into())),
            ("amount".to_string(), FieldValue::Number(1.0)),
        ]
        .into_iter()
        .collect();
        let b: Record = [
            ("purpose".to_string(), FieldValue::Text("transit".into())),
            ("isp".to_string(), FieldValue::Text("B".into())),
        ]
        .into_iter()
        .collect();

        let ds = Dataset::from_records(vec![a, b]);
        assert_eq!(ds.len(), 2);
        // A record's own fields iterate alphabetically (BTreeMap); columns
        // are appended the first time any record mentions them.
        assert_eq!(ds.column_names, vec!["amount", "isp", "purpose"]);
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(FieldValue::Number(10.0).to_string(), "10");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Null.to_string(), "");
    }
}
