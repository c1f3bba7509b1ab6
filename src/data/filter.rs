use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: one required value per column
// ---------------------------------------------------------------------------

/// Per-column constraint state: maps column_name → required value.
/// An empty value (or an absent column) means "no constraint" (show all).
pub type FilterSpec = BTreeMap<String, String>;

/// The constraints that actually restrict anything, i.e. the non-empty ones.
pub fn active_constraints(spec: &FilterSpec) -> impl Iterator<Item = (&String, &String)> {
    spec.iter().filter(|(_, value)| !value.is_empty())
}

/// Whether any constraint is currently active.
pub fn has_active_constraints(spec: &FilterSpec) -> bool {
    active_constraints(spec).next().is_some()
}

/// Whether a single record passes every active constraint.
///
/// A record passes a column constraint when:
/// * The constraint value is empty → passes (no constraint)
/// * The record's value for that column equals the constraint → passes
/// * The record lacks the column → fails (absent never equals non-empty)
pub fn record_matches(record: &Record, spec: &FilterSpec) -> bool {
    active_constraints(spec).all(|(col, required)| {
        record
            .get(col)
            .map(|val| val.matches(required))
            .unwrap_or(false)
    })
}

/// Return indices of records that pass all active constraints, preserving
/// dataset order.
pub fn matching_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| record_matches(rec, spec))
        .map(|(i, _)| i)
        .collect()
}

/// Filter a record sequence down to the matching records, preserving order.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    spec: &FilterSpec,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|rec| record_matches(rec, spec))
        .collect()
}

// ---------------------------------------------------------------------------
// Unique-value extraction (filter dropdown options)
// ---------------------------------------------------------------------------

/// Distinct present values of a field, sorted ascending. Missing and empty
/// values are excluded; duplicates collapse.
pub fn unique_values<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: &str,
) -> Vec<String> {
    let set: BTreeSet<String> = records
        .into_iter()
        .filter_map(|rec| rec.get(field))
        .filter(|val| val.is_present())
        .map(|val| val.to_string())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldValue;
    use pretty_assertions::assert_eq;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
            .collect()
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            rec(&[("isp", "Northlink"), ("purpose", "transit")]),
            rec(&[("isp", "Westgrid"), ("purpose", "peering")]),
            rec(&[("isp", "Northlink"), ("purpose", "peering")]),
        ])
    }

    #[test]
    fn all_empty_constraints_are_identity() {
        let ds = sample();
        let mut spec = FilterSpec::new();
        spec.insert("isp".into(), String::new());
        spec.insert("purpose".into(), String::new());

        assert!(!has_active_constraints(&spec));
        assert_eq!(matching_indices(&ds, &spec), vec![0, 1, 2]);
    }

    #[test]
    fn active_constraint_selects_exactly_the_matching_records() {
        let ds = sample();
        let mut spec = FilterSpec::new();
        spec.insert("isp".into(), "Northlink".into());

        let indices = matching_indices(&ds, &spec);
        assert_eq!(indices, vec![0, 2]);
        for &i in &indices {
            assert_eq!(ds.records[i].display("isp"), "Northlink");
        }
        // No record outside the result matches.
        assert_eq!(ds.records[1].display("isp"), "Westgrid");
    }

    #[test]
    fn constraints_combine_conjunctively() {
        let ds = sample();
        let mut spec = FilterSpec::new();
        spec.insert("isp".into(), "Northlink".into());
        spec.insert("purpose".into(), "peering".into());

        assert_eq!(matching_indices(&ds, &spec), vec![2]);
    }

    #[test]
    fn absent_field_fails_any_active_constraint() {
        let ds = Dataset::from_records(vec![rec(&[("isp", "Northlink")])]);
        let mut spec = FilterSpec::new();
        spec.insert("payer".into(), "local".into());

        assert_eq!(matching_indices(&ds, &spec), Vec::<usize>::new());
    }

    #[test]
    fn numeric_field_matches_textual_constraint() {
        let row: Record = [
            ("isp".to_string(), FieldValue::Text("A".into())),
            ("port_count".to_string(), FieldValue::Number(4.0)),
        ]
        .into_iter()
        .collect();
        let ds = Dataset::from_records(vec![row]);

        let mut spec = FilterSpec::new();
        spec.insert("port_count".into(), "4".into());
        assert_eq!(matching_indices(&ds, &spec), vec![0]);
    }

    #[test]
    fn unique_values_sorted_deduped_empties_excluded() {
        let records = vec![
            rec(&[("isp", "B")]),
            rec(&[("isp", "A")]),
            rec(&[("isp", "A")]),
            rec(&[("isp", "")]),
        ];
        assert_eq!(unique_values(&records, "isp"), vec!["A", "B"]);
    }

    #[test]
    fn unique_values_keep_numeric_zero() {
        let rows = vec![
            [("hops".to_string(), FieldValue::Number(0.0))]
                .into_iter()
                .collect::<Record>(),
            [("hops".to_string(), FieldValue::Number(2.0))]
                .into_iter()
                .collect::<Record>(),
        ];
        assert_eq!(unique_values(&rows, "hops"), vec!["0", "2"]);
    }
}
