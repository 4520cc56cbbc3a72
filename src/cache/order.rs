//! Order Tracker Module
//!
//! A doubly linked sequence over all live cache entries, backed by a slot
//! arena. Nodes are addressed by stable [`NodeId`] handles instead of
//! references, which gives O(1) append, move-to-back and removal without any
//! pointer chasing. Head is the oldest position, tail the newest.
//!
//! Slot indices are recycled through a free list. An id is only ever stored
//! in the bucket index, and both are updated inside the same critical
//! section, so a recycled id can never be observed by a stale holder.

// == Node Id ==
/// Stable handle for a node in the order sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the underlying slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

// == Node ==
#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == Order Tracker ==
/// Arena-backed doubly linked sequence with stable node handles.
#[derive(Debug)]
pub struct OrderTracker<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> OrderTracker<T> {
    // == Constructors ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty tracker with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Accessors ==
    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the id at the oldest position.
    pub fn head_id(&self) -> Option<NodeId> {
        self.head
    }

    /// Returns the id at the newest position.
    pub fn tail_id(&self) -> Option<NodeId> {
        self.tail
    }

    /// Returns the value for a node id, if the node is live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if the node is live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.value)
    }

    /// Iterates `(NodeId, &T)` from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tracker: self,
            current: self.head,
        }
    }

    // == Mutations ==
    /// Appends a value at the newest position and returns its id.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: self.tail,
            next: None,
        };
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        let id = NodeId(idx);

        if let Some(tail) = self.tail {
            if let Some(tail_node) = self.node_mut(tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Removes a node and returns its value; the slot is recycled.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.detach(id)?;
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Moves a live node to the newest position; returns `false` if `id` is
    /// not live.
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if Some(id) == self.tail {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    // == Internal Linking ==
    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.node_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.node_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(id) {
            node.prev = old_tail;
            node.next = None;
        } else {
            return;
        }
        if let Some(old_tail) = old_tail {
            if let Some(tail_node) = self.node_mut(old_tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
    }

    // == Debug Validation ==
    /// Walks the links and asserts the sequence is internally consistent.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle through {:?}", id);
            let node = self.node(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
    }
}

impl<T> Default for OrderTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Iterator over `(NodeId, &T)` pairs from oldest to newest.
pub struct Iter<'a, T> {
    tracker: &'a OrderTracker<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.tracker.node(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}
