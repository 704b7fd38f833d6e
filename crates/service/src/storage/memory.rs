use std::sync::Arc;
use tokio::sync::RwLock;

/// Generic in-memory ordered sequence store.
///
/// Keeps a `Vec<T>` behind a single reader-writer lock. Insertion order is
/// preserved and removal shifts later elements, so positions always reflect
/// insertion order. Every method takes the lock exactly once, which keeps
/// each operation atomic with respect to concurrent callers.
#[derive(Clone)]
pub struct SeqStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for SeqStore<T> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(Vec::new())) }
    }
}

impl<T: Clone> SeqStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all items in insertion order.
    pub async fn list(&self) -> Vec<T> {
        let items = self.inner.read().await;
        items.clone()
    }

    /// Snapshot of the items matching `pred`, in insertion order.
    pub async fn filter<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().filter(|item| pred(item)).cloned().collect()
    }

    /// Append an item at the end of the sequence.
    pub async fn push(&self, item: T) {
        let mut items = self.inner.write().await;
        items.push(item);
    }

    /// Item at `index`, if present.
    pub async fn get(&self, index: usize) -> Option<T> {
        let items = self.inner.read().await;
        items.get(index).cloned()
    }

    /// Position of the first item matching `pred`.
    pub async fn position<P>(&self, pred: P) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().position(|item| pred(item))
    }

    /// Mutate the item at `index` in place; returns the updated item.
    pub async fn update<F>(&self, index: usize, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.inner.write().await;
        let item = items.get_mut(index)?;
        f(item);
        Some(item.clone())
    }

    /// Remove the item at `index`, shifting later items to close the gap.
    pub async fn remove(&self, index: usize) -> Option<T> {
        let mut items = self.inner.write().await;
        if index >= items.len() {
            return None;
        }
        Some(items.remove(index))
    }

    pub async fn len(&self) -> usize {
        let items = self.inner.read().await;
        items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
