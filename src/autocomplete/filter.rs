//! Case-insensitive substring filtering.

use super::record::LabelSelector;

/// Returns the positions of records whose label contains `query`,
/// ignoring case, in collection order.
///
/// An empty query matches nothing: the list stays closed until the user
/// has typed something.
pub fn filter_indices<R, S>(records: &[R], query: &str, selector: &S) -> Vec<usize>
where
    S: LabelSelector<R> + ?Sized,
{
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| selector.label(record).to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Returns the matching records themselves, in collection order.
pub fn filter<'a, R, S>(records: &'a [R], query: &str, selector: &S) -> Vec<&'a R>
where
    S: LabelSelector<R> + ?Sized,
{
    filter_indices(records, query, selector)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}
