//! Recency List Module
//!
//! Doubly-linked recency ordering stored in an arena of slots.
//!
//! Slots are addressed by [`SlotId`] handles rather than pointers, so links are
//! plain indices and the list owns every payload. Two sentinel slots bound the
//! chain:
//! - Head = LRU boundary, `head.next` is the next eviction candidate
//! - Tail = MRU boundary, `tail.prev` is the most recently used item
//!
//! Sentinels never hold a payload and are never handed out or removed.

use crate::error::{CacheError, Result};

const HEAD: usize = 0;
const TAIL: usize = 1;
const NIL: usize = usize::MAX;

// == Slot Handle ==
/// Stable handle to a live slot in a [`RecencyList`].
///
/// A handle stays valid until its slot is removed, after which the slot may be
/// reused for a different item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Debug)]
struct Node<T> {
    prev: usize,
    next: usize,
    item: Option<T>,
}

// == Recency List ==
/// Arena-backed doubly-linked list ordered from LRU to MRU.
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    /// Indices of vacant slots available for reuse
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates an empty list holding only the two linked sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node {
            prev: NIL,
            next: TAIL,
            item: None,
        });
        nodes.push(Node {
            prev: HEAD,
            next: NIL,
            item: None,
        });

        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push MRU ==
    /// Stores `item` in a fresh slot linked at the MRU end.
    pub fn push_mru(&mut self, item: T) -> SlotId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].item = Some(item);
                idx
            }
            None => {
                self.nodes.push(Node {
                    prev: NIL,
                    next: NIL,
                    item: Some(item),
                });
                self.nodes.len() - 1
            }
        };

        self.link_at_mru(idx);
        self.len += 1;
        SlotId(idx)
    }

    // == Remove ==
    /// Unlinks the slot, frees it for reuse and returns its item.
    ///
    /// Returns None for a handle that is not live.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.is_live(id.0) {
            return None;
        }

        self.unlink(id.0);
        let item = self.nodes[id.0].item.take();
        self.free.push(id.0);
        self.len -= 1;
        item
    }

    // == Touch ==
    /// Moves a live slot to the MRU end.
    pub fn touch(&mut self, id: SlotId) {
        if !self.is_live(id.0) {
            return;
        }
        // Already the MRU item
        if self.nodes[TAIL].prev == id.0 {
            return;
        }

        self.unlink(id.0);
        self.link_at_mru(id.0);
    }

    // == Peek LRU ==
    /// Returns the handle of the least recently used slot.
    pub fn lru(&self) -> Option<SlotId> {
        let first = self.nodes[HEAD].next;
        (first != TAIL).then_some(SlotId(first))
    }

    #[cfg(test)]
    fn mru(&self) -> Option<SlotId> {
        let last = self.nodes[TAIL].prev;
        (last != HEAD).then_some(SlotId(last))
    }

    // == Accessors ==
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.item.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.item.as_mut())
    }

    /// Returns the number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates live items from the LRU end to the MRU end.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
        }
    }

    // == Integrity Check ==
    /// Walks the chain from head to tail and verifies its shape.
    ///
    /// Checks that every hop is mirrored by the back-link, that only the
    /// sentinels are payload-free along the way, that the walk terminates at
    /// the tail without revisiting a slot, and that the number of linked slots
    /// matches the live count.
    pub fn check_integrity(&self) -> Result<()> {
        if self.nodes[HEAD].prev != NIL || self.nodes[TAIL].next != NIL {
            return Err(CacheError::Corrupted(
                "sentinel outer links must be empty".to_string(),
            ));
        }
        if self.nodes[HEAD].item.is_some() || self.nodes[TAIL].item.is_some() {
            return Err(CacheError::Corrupted(
                "sentinel holds an item".to_string(),
            ));
        }

        let mut prev = HEAD;
        let mut cursor = self.nodes[HEAD].next;
        let mut linked = 0usize;

        while cursor != TAIL {
            let node = self.nodes.get(cursor).ok_or_else(|| {
                CacheError::Corrupted(format!("link {} points outside the arena", cursor))
            })?;
            if node.item.is_none() {
                return Err(CacheError::Corrupted(format!(
                    "slot {} is linked but vacant",
                    cursor
                )));
            }
            if node.prev != prev {
                return Err(CacheError::Corrupted(format!(
                    "slot {} back-link is {}, expected {}",
                    cursor, node.prev, prev
                )));
            }

            linked += 1;
            // More hops than live slots means a cycle
            if linked > self.len {
                return Err(CacheError::Corrupted(format!(
                    "chain longer than {} live slots",
                    self.len
                )));
            }

            prev = cursor;
            cursor = node.next;
        }

        if self.nodes[TAIL].prev != prev {
            return Err(CacheError::Corrupted(
                "tail back-link does not close the chain".to_string(),
            ));
        }
        if linked != self.len {
            return Err(CacheError::Corrupted(format!(
                "{} slots linked but {} live",
                linked, self.len
            )));
        }
        if self.free.len() + self.len + 2 != self.nodes.len() {
            return Err(CacheError::Corrupted("orphaned slots in arena".to_string()));
        }

        Ok(())
    }

    // == Splice Primitives ==

    fn is_live(&self, idx: usize) -> bool {
        idx != HEAD
            && idx != TAIL
            && self
                .nodes
                .get(idx)
                .map_or(false, |node| node.item.is_some())
    }

    /// Splices a slot out by joining its neighbours, then clears its own links.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    /// Splices an unlinked slot in immediately before the tail sentinel.
    fn link_at_mru(&mut self, idx: usize) {
        let last = self.nodes[TAIL].prev;
        self.nodes[idx].prev = last;
        self.nodes[idx].next = TAIL;

        self.nodes[last].next = idx;
        self.nodes[TAIL].prev = idx;
    }
}

// == Iterator ==
/// Iterator over live items, LRU first.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL || self.cursor == NIL {
            return None;
        }

        let idx = self.cursor;
        let node = &self.list.nodes[idx];
        self.cursor = node.next;
        node.item.as_ref().map(|item| (SlotId(idx), item))
    }
}

#[cfg(test)]
impl<T> Node<T> {
    fn links(&self) -> (usize, usize) {
        (self.prev, self.next)
    }
}
