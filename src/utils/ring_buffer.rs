//! A fixed-capacity ring buffer for bounded history keeping.

use std::collections::VecDeque;

/// A bounded FIFO buffer. Pushing onto a full buffer drops the oldest
/// element, so memory stays constant however long the app runs.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a new ring buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be greater than 0");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds an element to the back, evicting the oldest when full.
    pub fn push(&mut self, item: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.data.back()
    }

    /// Collects all elements into a `Vec`, oldest first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer: RingBuffer<i32> = RingBuffer::new(5);
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 5);
        assert!(buffer.is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _: RingBuffer<i32> = RingBuffer::new(0);
    }

    #[test]
    fn test_push_within_capacity() {
        let mut buffer = RingBuffer::new(3);
        buffer.push(1);
        buffer.push(2);
        assert_eq!(buffer.to_vec(), vec![1, 2]);
        assert_eq!(buffer.last(), Some(&2));
    }

    #[test]
    fn test_push_overflow_drops_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 1..=5 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_wraparound_multiple_times() {
        let mut buffer = RingBuffer::new(3);
        for i in 0..10 {
            buffer.push(i);
        }
        assert_eq!(buffer.to_vec(), vec![7, 8, 9]);
    }

    #[test]
    fn test_single_capacity() {
        let mut buffer = RingBuffer::new(1);
        buffer.push(1);
        buffer.push(2);
        assert_eq!(buffer.to_vec(), vec![2]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = RingBuffer::new(3);
        buffer.push(1);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.last(), None);
    }

    #[test]
    fn test_iter_order() {
        let mut buffer = RingBuffer::new(3);
        buffer.push("a");
        buffer.push("b");
        let items: Vec<_> = buffer.iter().collect();
        assert_eq!(items, vec![&"a", &"b"]);
    }
}
