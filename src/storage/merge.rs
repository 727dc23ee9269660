use crate::records::Keyed;
use std::collections::HashSet;

/// Appends records whose keys are not already in the collection
///
/// Existing entries are never touched or reordered. New records are checked
/// against everything accumulated so far, including records appended earlier
/// in the same call, so duplicates within one page collapse too.
///
/// Returns the full collection and the number of records appended.
pub fn merge<R: Keyed>(existing: Vec<R>, new_records: Vec<R>) -> (Vec<R>, usize) {
    let mut seen: HashSet<String> = existing.iter().map(Keyed::unique_key).collect();
    let mut collection = existing;
    let before = collection.len();

    for record in new_records {
        if seen.insert(record.unique_key()) {
            collection.push(record);
        }
    }

    let added = collection.len() - before;
    (collection, added)
}
