use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Repository;

#[derive(Debug)]
struct Table<K, V> {
    order: Vec<K>,
    rows: HashMap<K, V>,
}

/// In-memory repository for tests/dev.
#[derive(Debug)]
pub struct InMemoryRepository<K, V> {
    inner: RwLock<Table<K, V>>,
}

impl<K, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table {
                order: Vec::new(),
                rows: HashMap::new(),
            }),
        }
    }

    // A panic while holding the lock cannot leave a half-written row behind,
    // so poisoned locks are recovered rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, Table<K, V>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table<K, V>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Repository<K, V> for InMemoryRepository<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        self.read().rows.get(key).cloned()
    }

    fn get_many(&self, keys: &[K]) -> Vec<V> {
        let table = self.read();
        keys.iter().filter_map(|k| table.rows.get(k).cloned()).collect()
    }

    fn upsert(&self, key: K, value: V) {
        let mut table = self.write();
        if table.rows.insert(key.clone(), value).is_none() {
            table.order.push(key);
        }
    }

    fn insert_unique(&self, key: K, value: V, clashes: &dyn Fn(&V, &V) -> bool) -> bool {
        let mut table = self.write();
        if table.rows.contains_key(&key) || table.rows.values().any(|row| clashes(row, &value)) {
            return false;
        }
        table.rows.insert(key.clone(), value);
        table.order.push(key);
        true
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut table = self.write();
        let removed = table.rows.remove(key);
        if removed.is_some() {
            table.order.retain(|k| k != key);
        }
        removed
    }

    fn list(&self) -> Vec<V> {
        let table = self.read();
        table
            .order
            .iter()
            .filter_map(|k| table.rows.get(k).cloned())
            .collect()
    }

    fn count(&self) -> usize {
        self.read().rows.len()
    }

    fn update_many(&self, keys: &[K], f: &mut dyn FnMut(Vec<&mut V>)) {
        let mut guard = self.write();
        let Table { order, rows } = &mut *guard;

        let wanted: HashSet<&K> = keys.iter().collect();
        let mut matched: HashMap<&K, &mut V> = rows
            .iter_mut()
            .filter(|(k, _)| wanted.contains(k))
            .collect();
        let selected: Vec<&mut V> = order.iter().filter_map(|k| matched.remove(k)).collect();

        tracing::debug!(requested = keys.len(), matched = selected.len(), "bulk update");
        f(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with(values: &[(u32, i64)]) -> InMemoryRepository<u32, i64> {
        let repo = InMemoryRepository::new();
        for (k, v) in values {
            repo.upsert(*k, *v);
        }
        repo
    }

    #[test]
    fn list_keeps_insertion_order_across_updates() {
        let repo = repo_with(&[(3, 30), (1, 10), (2, 20)]);
        repo.upsert(1, 11);
        assert_eq!(repo.list(), vec![30, 11, 20]);
        assert_eq!(repo.count(), 3);
    }

    #[test]
    fn remove_drops_from_listing() {
        let repo = repo_with(&[(1, 10), (2, 20)]);
        assert_eq!(repo.remove(&1), Some(10));
        assert_eq!(repo.remove(&1), None);
        assert_eq!(repo.list(), vec![20]);
    }

    #[test]
    fn get_many_skips_missing_keys() {
        let repo = repo_with(&[(1, 10), (2, 20)]);
        assert_eq!(repo.get_many(&[2, 9, 1]), vec![20, 10]);
    }

    #[test]
    fn update_many_sees_each_match_once_in_listing_order() {
        let repo = repo_with(&[(1, 10), (2, 20), (3, 30)]);
        let mut seen = Vec::new();
        repo.update_many(&[3, 1, 3, 42], &mut |rows| {
            seen = rows.iter().map(|v| **v).collect();
            for v in rows {
                *v = 0;
            }
        });
        assert_eq!(seen, vec![10, 30]);
        assert_eq!(repo.list(), vec![0, 20, 0]);
    }

    #[test]
    fn insert_unique_refuses_clashing_rows() {
        let repo = repo_with(&[(1, 10)]);
        let same_tens = |a: &i64, b: &i64| a / 10 == b / 10;
        assert!(!repo.insert_unique(2, 15, &same_tens));
        assert!(!repo.insert_unique(1, 99, &same_tens));
        assert!(repo.insert_unique(2, 20, &same_tens));
        assert_eq!(repo.list(), vec![10, 20]);
    }

    #[test]
    fn concurrent_unique_inserts_admit_one_winner() {
        let repo = InMemoryRepository::<u32, i64>::new();
        let winners: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8u32)
                .map(|k| {
                    let repo = &repo;
                    s.spawn(move || repo.insert_unique(k, 7, &|a, b| a == b))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });
        assert_eq!(winners, 1);
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn shared_through_arc() {
        let repo = std::sync::Arc::new(repo_with(&[(1, 10)]));
        let handle = repo.clone();
        handle.upsert(2, 20);
        assert_eq!(Repository::list(&repo), vec![10, 20]);
    }
}
