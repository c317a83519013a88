//! Binary min-heap used as the open set of an A* search.
//!
//! Entries live in a 1-indexed backing array whose length is managed by hand:
//! it doubles when full and halves once only a quarter of it is in use, so a
//! freshly resized frontier is always half full and cannot thrash between
//! the two thresholds.

use tracing::trace;

use crate::error::FrontierError;

pub struct PriorityFrontier<T, F> {
    slots: Vec<Option<T>>,
    count: usize,
    key: F,
}

impl<T, K, F> PriorityFrontier<T, F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    /// Creates an empty frontier ordered by `key`, smallest first.
    pub fn new(key: F) -> Self {
        Self {
            slots: vec![None],
            count: 0,
            key,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of entries the backing array holds before it has to grow.
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn insert(&mut self, item: T) {
        if self.count == self.capacity() {
            self.resize(self.count.max(1) * 2);
        }
        self.count += 1;
        self.slots[self.count] = Some(item);
        self.swim(self.count);
    }

    /// Removes and returns the entry with the smallest key.
    pub fn extract_min(&mut self) -> Result<T, FrontierError> {
        if self.count == 0 {
            return Err(FrontierError::Empty);
        }

        self.slots.swap(1, self.count);
        let min = self.slots[self.count].take();
        self.count -= 1;
        if self.count > 0 && self.count * 4 == self.capacity() {
            self.resize(self.count * 2);
        }
        self.sink(1);

        min.ok_or(FrontierError::Empty)
    }

    pub fn peek_min(&self) -> Result<&T, FrontierError> {
        if self.count == 0 {
            return Err(FrontierError::Empty);
        }
        self.slots[1].as_ref().ok_or(FrontierError::Empty)
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.greater(k / 2, k) {
            self.slots.swap(k, k / 2);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        while 2 * k <= self.count {
            let mut j = 2 * k;
            if j < self.count && self.greater(j, j + 1) {
                j += 1;
            }
            if !self.greater(k, j) {
                break;
            }
            self.slots.swap(k, j);
            k = j;
        }
    }

    fn greater(&self, i: usize, j: usize) -> bool {
        match (&self.slots[i], &self.slots[j]) {
            (Some(a), Some(b)) => (self.key)(a) > (self.key)(b),
            _ => false,
        }
    }

    fn resize(&mut self, capacity: usize) {
        trace!(from = self.capacity(), to = capacity, "resizing frontier");
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(None);
        slots.extend(self.slots[1..=self.count].iter_mut().map(Option::take));
        slots.resize_with(capacity + 1, || None);
        self.slots = slots;
    }
}

impl<T, F> std::fmt::Debug for PriorityFrontier<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityFrontier")
            .field("count", &self.count)
            .field("capacity", &(self.slots.len() - 1))
            .finish()
    }
}
