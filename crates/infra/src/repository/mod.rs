//! Record storage boundary used by the admin layer.
//!
//! The store crates never talk to a database directly; they go through
//! [`Repository`], which any backend can implement. The in-memory
//! implementation is used by tests and local tooling.

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use std::sync::Arc;

/// Keyed record store with insertion-ordered listing and atomic bulk updates.
pub trait Repository<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;

    /// Records for the given keys, in key order. Missing keys are skipped.
    fn get_many(&self, keys: &[K]) -> Vec<V>;

    fn upsert(&self, key: K, value: V);

    /// Insert `value` unless an existing record `clashes` with it. The check and
    /// the insert happen under one write lock. Returns whether it was inserted.
    fn insert_unique(&self, key: K, value: V, clashes: &dyn Fn(&V, &V) -> bool) -> bool;

    fn remove(&self, key: &K) -> Option<V>;

    /// All records, oldest insertion first.
    fn list(&self) -> Vec<V>;

    fn count(&self) -> usize;

    /// Hand the records matching `keys` (each at most once, in listing order)
    /// to `f` under a single write lock.
    ///
    /// Missing keys are ignored, so `f` may receive fewer records than keys.
    fn update_many(&self, keys: &[K], f: &mut dyn FnMut(Vec<&mut V>));
}

impl<K, V, S> Repository<K, V> for Arc<S>
where
    S: Repository<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn get_many(&self, keys: &[K]) -> Vec<V> {
        (**self).get_many(keys)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn insert_unique(&self, key: K, value: V, clashes: &dyn Fn(&V, &V) -> bool) -> bool {
        (**self).insert_unique(key, value, clashes)
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn update_many(&self, keys: &[K], f: &mut dyn FnMut(Vec<&mut V>)) {
        (**self).update_many(keys, f)
    }
}
