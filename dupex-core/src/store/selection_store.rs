//! SelectionStore - tracked set of media variants marked for an action
//!
//! Two instances back the review flow: one for variants selected for
//! deletion, one for variants already deleted this session. Components that
//! need to react to membership changes register a [`SelectionSubscriber`];
//! registration is explicit, there is no implicit dependency tracking.

use std::collections::HashMap;
use std::sync::Weak;

use tracing::trace;

use crate::units::ByteSize;
use dupex_model::{MediaVariant, MovieKey, VariantId};

/// A variant tracked by a selection set, with enough context to act on it
/// later without consulting the movie listing again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMedia {
    pub movie: MovieKey,
    pub variant: MediaVariant,
}

impl SelectedMedia {
    pub fn new(movie: MovieKey, variant: MediaVariant) -> Self {
        Self { movie, variant }
    }

    /// Bytes reclaimed if this variant is deleted.
    pub fn size(&self) -> u64 {
        self.variant.total_size()
    }
}

/// Change event for subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added { movie: MovieKey, variant: VariantId },
    Removed { movie: MovieKey, variant: VariantId },
    /// The whole set was reset. Emitted even when the store was already
    /// empty.
    Cleared,
}

/// Trait for components that want to be notified of selection changes.
pub trait SelectionSubscriber: Send + Sync {
    fn on_selection_changed(&self, change: SelectionChange);
}

/// Set of media variants keyed by variant id, with a running byte total.
pub struct SelectionStore {
    /// Name used in logs to tell the selected and deleted instances apart
    name: &'static str,

    /// Tracked variants indexed by id
    entries: HashMap<VariantId, SelectedMedia>,

    /// Running total of `SelectedMedia::size` over all entries
    total: ByteSize,

    /// Subscribers to notify of changes
    subscribers: Vec<Weak<dyn SelectionSubscriber>>,
}

impl SelectionStore {
    /// Create a new empty selection store.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            total: ByteSize::ZERO,
            subscribers: Vec::new(),
        }
    }

    /// Subscribe to selection changes.
    pub fn subscribe(&mut self, subscriber: Weak<dyn SelectionSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Track a variant. Returns `false` when the variant was already
    /// tracked; the byte total is not inflated and no event fires.
    pub fn insert(&mut self, item: SelectedMedia) -> bool {
        let id = item.variant.id;
        if self.entries.contains_key(&id) {
            trace!("[{}] variant {} already tracked", self.name, id);
            return false;
        }

        self.total = self.total.saturating_add(ByteSize::from_bytes(item.size()));
        let change = SelectionChange::Added {
            movie: item.movie.clone(),
            variant: id,
        };
        self.entries.insert(id, item);
        self.notify_subscribers(change);
        true
    }

    /// Stop tracking a variant, returning it if it was tracked.
    pub fn remove(&mut self, id: VariantId) -> Option<SelectedMedia> {
        let item = self.entries.remove(&id)?;
        self.total = self.total.saturating_sub(ByteSize::from_bytes(item.size()));
        self.notify_subscribers(SelectionChange::Removed {
            movie: item.movie.clone(),
            variant: id,
        });
        Some(item)
    }

    /// Reset the set.
    pub fn clear(&mut self) {
        trace!("[{}] clearing {} entries", self.name, self.entries.len());
        self.entries.clear();
        self.total = ByteSize::ZERO;
        self.notify_subscribers(SelectionChange::Cleared);
    }

    pub fn contains(&self, id: VariantId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: VariantId) -> Option<&SelectedMedia> {
        self.entries.get(&id)
    }

    /// Borrowed view of every tracked entry, in no particular order.
    pub fn items(&self) -> Vec<&SelectedMedia> {
        self.entries.values().collect()
    }

    /// Owned copy of every tracked entry, for handing to async work that
    /// outlives the borrow.
    pub fn snapshot(&self) -> Vec<SelectedMedia> {
        self.entries.values().cloned().collect()
    }

    /// Get total count of tracked variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running total of bytes across all tracked variants.
    pub fn total_size(&self) -> ByteSize {
        self.total
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total.as_bytes()
    }

    /// Notify subscribers of a change, pruning dead weak references.
    fn notify_subscribers(&mut self, change: SelectionChange) {
        self.subscribers.retain(|weak_sub| {
            if let Some(subscriber) = weak_sub.upgrade() {
                subscriber.on_selection_changed(change.clone());
                true
            } else {
                false
            }
        });
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .field("total", &self.total)
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}
