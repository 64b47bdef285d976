use std::collections::VecDeque;

/// Fixed-size rolling window of past samples for one channel.
///
/// Starts full of zeros so the plot always spans the whole window; every
/// push drops the oldest sample.
#[derive(Clone, Debug)]
pub struct HistoryBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    /// A zero-filled window of `capacity` samples. A capacity of zero is
    /// bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: core::iter::repeat(0.0).take(capacity).collect(),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// The window oldest-first, copied.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Oldest-first view of the window.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Sample at `index` counting from the oldest.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    #[inline]
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
