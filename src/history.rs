// src/history.rs

// fixed-capacity FIFO of admission instants

/// Ring buffer of reserved admission instants, in nanoseconds.
///
/// Capacity is fixed at construction and equals the throttle limit. The
/// buffer only supports the FIFO operations the sliding log needs; it never
/// blocks and never grows.
#[derive(Debug)]
pub(crate) struct History {
    slots: Box<[u64]>,
    head: usize,
    len: usize,
}

impl History {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append an instant at the back. Returns false (and stores nothing) when full.
    pub(crate) fn push_back(&mut self, instant: u64) -> bool {
        if self.is_full() {
            return false;
        }
        let tail = (self.head + self.len) % self.capacity();
        self.slots[tail] = instant;
        self.len += 1;
        true
    }

    /// Remove and return the oldest instant.
    pub(crate) fn pop_front(&mut self) -> Option<u64> {
        if self.len == 0 {
            return None;
        }
        let oldest = self.slots[self.head];
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Some(oldest)
    }

    /// The most recently reserved instant.
    pub(crate) fn back(&self) -> Option<u64> {
        if self.len == 0 {
            return None;
        }
        let last = (self.head + self.len - 1) % self.capacity();
        Some(self.slots[last])
    }

    /// Instants in enqueue order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % self.capacity()])
    }
}
