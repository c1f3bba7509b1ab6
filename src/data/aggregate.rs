use super::model::Record;

/// Group key used when a record's grouping field is missing or empty.
pub const UNCLASSIFIED: &str = "unclassified";

fn group_key(record: &Record, group_field: &str) -> String {
    match record.get(group_field) {
        Some(val) if val.is_present() => val.to_string(),
        _ => UNCLASSIFIED.to_string(),
    }
}

// ---------------------------------------------------------------------------
// GroupResult – per-category count and sum
// ---------------------------------------------------------------------------

/// Count and summed value for one group key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupEntry {
    pub count: usize,
    pub total: f64,
}

/// Grouped aggregation keyed by group value, iterating in first-seen order.
/// Chart categories follow this order, so it must stay stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupResult {
    entries: Vec<(String, GroupEntry)>,
}

impl GroupResult {
    pub fn get(&self, key: &str) -> Option<&GroupEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, e)| e)
    }

    fn entry_mut(&mut self, key: String) -> &mut GroupEntry {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            &mut self.entries[pos].1
        } else {
            self.entries.push((key, GroupEntry::default()));
            &mut self.entries.last_mut().unwrap().1
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group records by `group_field`, counting rows per group and summing the
/// soft-parsed `value_field`. Records with a missing or empty group field
/// land under [`UNCLASSIFIED`].
pub fn group_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    group_field: &str,
    value_field: &str,
) -> GroupResult {
    let mut result = GroupResult::default();
    for rec in records {
        let entry = result.entry_mut(group_key(rec, group_field));
        entry.count += 1;
        entry.total += rec.get(value_field).map(|v| v.as_number()).unwrap_or(0.0);
    }
    result
}

// ---------------------------------------------------------------------------
// ComparisonResult – year-over-year difference per category
// ---------------------------------------------------------------------------

/// Paired sums for one group key with the derived difference and change rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonEntry {
    pub value_a: f64,
    pub value_b: f64,
    pub difference: f64,
    pub percent_change: f64,
}

/// Year-over-year comparison keyed by group value, in first-seen order over
/// dataset A then dataset B. Keys present on only one side get 0 for the
/// missing side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonResult {
    entries: Vec<(String, ComparisonEntry)>,
}

impl ComparisonResult {
    pub fn get(&self, key: &str) -> Option<&ComparisonEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, e)| e)
    }

    fn entry_mut(&mut self, key: String) -> &mut ComparisonEntry {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            &mut self.entries[pos].1
        } else {
            self.entries.push((key, ComparisonEntry::default()));
            &mut self.entries.last_mut().unwrap().1
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ComparisonEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compare two record collections grouped by `group_field`, summing the
/// soft-parsed `compare_field` on each side.
///
/// Per key: `difference = value_b - value_a`, and
/// `percent_change = difference / value_a * 100` when `value_a != 0`.
/// Growth from zero to nonzero is pinned at 100%; zero on both sides is 0%.
pub fn compare_records<'a>(
    records_a: impl IntoIterator<Item = &'a Record>,
    records_b: impl IntoIterator<Item = &'a Record>,
    group_field: &str,
    compare_field: &str,
) -> ComparisonResult {
    let mut result = ComparisonResult::default();

    for rec in records_a {
        let value = rec.get(compare_field).map(|v| v.as_number()).unwrap_or(0.0);
        result.entry_mut(group_key(rec, group_field)).value_a += value;
    }
    for rec in records_b {
        let value = rec.get(compare_field).map(|v| v.as_number()).unwrap_or(0.0);
        result.entry_mut(group_key(rec, group_field)).value_b += value;
    }

    for (_, entry) in &mut result.entries {
        entry.difference = entry.value_b - entry.value_a;
        entry.percent_change = if entry.value_a != 0.0 {
            entry.difference / entry.value_a * 100.0
        } else if entry.value_b != 0.0 {
            100.0
        } else {
            0.0
        };
    }

    result
}
