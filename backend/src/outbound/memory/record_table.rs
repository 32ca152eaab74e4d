//! Generic keyed table shared by the in-memory repositories.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

/// Thread-safe, cloneable map of records keyed by id.
///
/// Locks are `parking_lot` and are never held across `.await` points.
#[derive(Debug)]
pub(crate) struct RecordTable<K, T> {
    rows: Arc<RwLock<HashMap<K, T>>>,
}

impl<K, T> Clone for RecordTable<K, T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<K, T> Default for RecordTable<K, T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K, T> RecordTable<K, T>
where
    K: Eq + Hash + Copy,
    T: Clone,
{
    pub(crate) fn get(&self, id: &K) -> Option<T> {
        self.rows.read().get(id).cloned()
    }

    pub(crate) fn list(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }

    /// Insert or replace `row` after `check` accepts the current contents.
    ///
    /// The check and the write happen under one write lock.
    pub(crate) fn put_checked<E>(
        &self,
        id: K,
        row: T,
        check: impl FnOnce(&HashMap<K, T>) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut rows = self.rows.write();
        check(&rows)?;
        rows.insert(id, row);
        Ok(())
    }

    /// Remove a row, returning whether one existed.
    pub(crate) fn remove(&self, id: &K) -> bool {
        self.rows.write().remove(id).is_some()
    }

    /// Project selected rows through `f`, skipping ids with no row.
    pub(crate) fn project<V>(&self, ids: &[K], f: impl Fn(&T) -> V) -> HashMap<K, V> {
        let rows = self.rows.read();
        ids.iter()
            .filter_map(|id| rows.get(id).map(|row| (*id, f(row))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(table: &RecordTable<u8, &'static str>, id: u8, row: &'static str) {
        table
            .put_checked(id, row, |_| Ok::<(), ()>(()))
            .expect("unchecked put");
    }

    #[test]
    fn put_checked_rejects_without_writing() {
        let table: RecordTable<u8, &str> = RecordTable::default();
        let result = table.put_checked(1, "one", |_| Err("blocked"));

        assert_eq!(result, Err("blocked"));
        assert!(table.get(&1).is_none());
    }

    #[test]
    fn clones_share_rows() {
        let table: RecordTable<u8, &str> = RecordTable::default();
        let other = table.clone();
        put(&table, 7, "seven");

        assert_eq!(other.get(&7), Some("seven"));
        assert!(other.remove(&7));
        assert!(!table.remove(&7));
    }

    #[test]
    fn project_skips_missing_ids() {
        let table: RecordTable<u8, &str> = RecordTable::default();
        put(&table, 1, "one");

        let projected = table.project(&[1, 2], |row| row.len());
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.get(&1), Some(&3));
    }
}
