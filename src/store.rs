/// Keyed records: a synthetic numeric id plus the email address used as the
/// natural key across imports.
pub trait Keyed {
    fn id(&self) -> i64;
    fn email(&self) -> &str;
}

/// In-memory, insertion-ordered collection of records. Stands in for a
/// database table: the whole collection lives for the lifetime of the
/// process and is rebuilt from seed data or imports on restart.
///
/// Ids are a monotonic counter starting at 1, so a freshly seeded store
/// behaves like "max existing id + 1" on every insert.
pub struct Store<T> {
    records: Vec<T>,
    next_id: i64,
}

impl<T: Keyed> Store<T> {
    pub fn new() -> Self {
        Store {
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Case-insensitive lookup by the natural key.
    pub fn find_by_email(&self, email: &str) -> Option<&T> {
        self.records
            .iter()
            .find(|r| r.email().eq_ignore_ascii_case(email))
    }

    /// Appends a new record built from the next id.
    pub fn insert(&mut self, make: impl FnOnce(i64) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(make(id));
        self.records.last().expect("just pushed")
    }

    /// Applies `patch` to the record with the given id. Returns false when no
    /// such record exists.
    pub fn update(&mut self, id: i64, patch: impl FnOnce(&mut T)) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(rec) => {
                patch(rec);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }

    /// Drops everything, id counter included. Used when reloading seed data.
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_id = 1;
    }
}

impl<T: Keyed> Default for Store<T> {
    fn default() -> Self {
        Store::new()
    }
}
