//! Grouping of fragment rows into one record per review.

use std::collections::HashMap;

use reviewhub_core::{Column, Fragment, RawRow, ReviewRecord};

use crate::schema::Schema;

/// Returns the fragment carried by `row`, if its text is non-blank.
fn fragment_of(row: &RawRow) -> Option<Fragment> {
    let text = row.get(Column::SubcategoryFragment);
    if text.trim().is_empty() {
        return None;
    }
    Some(Fragment {
        text: text.to_string(),
        sentiment: row.get(Column::SubcategorySentiment).to_string(),
        category: row.get(Column::Category).to_string(),
        subcategory: row.get(Column::Subcategory).to_string(),
    })
}

/// Partitions `rows` by identity key and folds each group into a [`ReviewRecord`].
///
/// Records come out in first-seen key order and fragments keep row order.
/// Metadata is taken from the first row of each group, even when later rows
/// disagree.
pub fn aggregate(schema: &Schema, rows: &[RawRow]) -> Vec<ReviewRecord> {
    let mut slots: HashMap<Vec<&str>, usize> = HashMap::new();
    let mut records: Vec<ReviewRecord> = Vec::new();

    for row in rows {
        let slot = *slots.entry(schema.key(row)).or_insert_with(|| {
            records.push(ReviewRecord::from_first_row(row));
            records.len() - 1
        });
        if let Some(fragment) = fragment_of(row) {
            records[slot].fragments.push(fragment);
        }
    }

    records
}
