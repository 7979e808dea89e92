use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Occurrence counts for a sequence of values, kept in first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    entries: Vec<(T, usize)>,
    index: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }

    /// Count one more occurrence of `value`.
    pub fn record(&mut self, value: T) {
        match self.index.get(&value) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(value.clone(), self.entries.len());
                self.entries.push((value, 1));
            }
        }
    }

    pub fn count(&self, value: &T) -> usize {
        self.index.get(value).map_or(0, |&position| self.entries[position].1)
    }

    /// Number of distinct values seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry by descending count. Equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&T, usize)> {
        let mut ranked: Vec<_> = self.entries.iter().map(|(value, count)| (value, *count)).collect();
        // sort_by is stable, which is what breaks ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `k` most frequent values, without their counts.
    pub fn top(&self, k: usize) -> Vec<T> {
        self.ranked().into_iter().take(k).map(|(value, _)| value.clone()).collect()
    }
}

impl<T: Eq + Hash + Clone> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FrequencyTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

/// The `k` most frequent values in `values`, ties broken by first appearance.
pub fn top_k<T, I>(values: I, k: usize) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    values.into_iter().collect::<FrequencyTable<T>>().top(k)
}

/// Number of distinct values in `values`.
pub fn unique_count<T, I>(values: I) -> usize
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    values.into_iter().collect::<HashSet<T>>().len()
}
