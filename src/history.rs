use std::collections::VecDeque;

/// Default number of lines kept.
pub const DEFAULT_CAPACITY: usize = 2048;

/// Previously entered lines, oldest first, bounded by a fixed capacity.
///
/// Pushing into a full log evicts the oldest entry.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a line. Empty lines are ignored.
    pub fn push(&mut self, line: &str) {
        if line.is_empty() || self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The most recent `n` entries, oldest first.
    ///
    /// `n` of zero or less, or larger than the stored count, selects everything.
    pub fn recent(&self, n: i64) -> impl Iterator<Item = &str> {
        let skip = match usize::try_from(n) {
            Ok(n) if n > 0 && n <= self.len() => self.len() - n,
            _ => 0,
        };
        self.entries.iter().skip(skip).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
