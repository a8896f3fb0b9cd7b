//! Common display utilities and helpers

use tabled::Tabled;

/// Keep the rows where any column contains `query`, ignoring case.
///
/// An empty query keeps every row.
pub fn filter_rows<T: Tabled>(rows: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| {
            row.fields()
                .iter()
                .any(|cell| cell.to_lowercase().contains(&needle))
        })
        .collect()
}
