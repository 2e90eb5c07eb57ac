use crate::sheet::ImportRow;
use crate::store::{Keyed, Store};

/// A record type that can be built from and updated by spreadsheet rows,
/// and rendered back out as template/export rows.
pub trait Importable: Keyed + Sized {
    /// Recognized columns, in the order templates and exports emit them.
    const COLUMNS: &'static [&'static str];

    /// The single illustrative row written into a downloadable template.
    fn template_row() -> Vec<String>;

    /// One export row, aligned with `COLUMNS`. List-valued fields join
    /// their tokens with ", ".
    fn export_row(&self) -> Vec<String>;

    /// Builds a fresh record from a row. Called only once the row's email
    /// has been resolved; missing columns take their defaults.
    fn from_row(id: i64, email: String, row: &ImportRow) -> Self;

    /// Overwrites every field the row supplies onto an existing record,
    /// leaving the id and anything the row cannot carry untouched.
    fn apply_row(&mut self, email: String, row: &ImportRow);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergeOutcome {
    pub added: usize,
    pub updated: usize,
}

/// Merges decoded rows into the collection, in file order.
///
/// The email column is the merge key, compared case-insensitively. Rows
/// without one have no merge target and are skipped without error. A
/// matching record is updated in place; anything else is appended under the
/// next id. Each row stands alone, so a malformed row never blocks the
/// rest, and re-importing the same file is a no-op apart from the counters
/// shifting from added to updated.
pub fn merge_rows<T: Importable>(store: &mut Store<T>, rows: &[ImportRow]) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for row in rows {
        let Some(email) = row.email() else {
            continue;
        };
        match store.find_by_email(&email).map(|r| r.id()) {
            Some(id) => {
                store.update(id, |rec| rec.apply_row(email, row));
                outcome.updated += 1;
            }
            None => {
                store.insert(|id| T::from_row(id, email, row));
                outcome.added += 1;
            }
        }
    }
    outcome
}
