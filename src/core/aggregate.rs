//! Interval aggregation of engagement ratings.
//!
//! Ratings arrive as a finite sequence in annotation order and are grouped
//! into fixed-size windows (default 2 ratings per window). Each window
//! produces one unweighted arithmetic mean. A trailing partial window is
//! emitted with the mean of whatever ratings it holds.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Mean engagement over one window of consecutive ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowMean {
    /// Zero-based window index: rating at position `p` lands in window
    /// `p / window_size`.
    pub index: u64,
    /// Unweighted arithmetic mean of the ratings in the window
    pub mean: f64,
}

/// Lazy windowed-mean iterator over a rating sequence.
///
/// Produced by [`aggregate`]. Windows come out in arrival order; consuming
/// the iterator partially is the only cancellation mechanism.
pub struct Aggregate<I> {
    ratings: I,
    window_size: usize,
    next_index: u64,
}

/// Group `ratings` into windows of `window_size` and yield one mean per
/// window.
///
/// Invalid ratings must be filtered out before calling; positions are counted
/// over the sequence as given. An empty input yields an empty output.
///
/// # Panics
///
/// Panics if `window_size` is zero.
pub fn aggregate<I>(ratings: I, window_size: usize) -> Aggregate<I::IntoIter>
where
    I: IntoIterator<Item = f64>,
{
    assert!(window_size >= 1, "window_size must be at least 1");
    Aggregate {
        ratings: ratings.into_iter(),
        window_size,
        next_index: 0,
    }
}

impl<I> Iterator for Aggregate<I>
where
    I: Iterator<Item = f64>,
{
    type Item = WindowMean;

    fn next(&mut self) -> Option<WindowMean> {
        let mut window = Vec::with_capacity(self.window_size);
        while window.len() < self.window_size {
            match self.ratings.next() {
                Some(rating) => window.push(rating),
                None => break,
            }
        }

        if window.is_empty() {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;
        Some(WindowMean {
            index,
            mean: window.iter().mean(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_windows() {
        let means: Vec<WindowMean> = aggregate(vec![1.0, 2.0, 3.0, 5.0], 2).collect();

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].index, 0);
        assert_eq!(means[0].mean, 1.5);
        assert_eq!(means[1].index, 1);
        assert_eq!(means[1].mean, 4.0);
    }

    #[test]
    fn test_trailing_partial_window() {
        let means: Vec<WindowMean> = aggregate(vec![1.0, 1.0, 2.0, 2.0, 3.0], 2).collect();

        assert_eq!(means.len(), 3);
        assert_eq!(means[0].mean, 1.0);
        assert_eq!(means[1].mean, 2.0);
        // One-element window: the mean is that element.
        assert_eq!(means[2].index, 2);
        assert_eq!(means[2].mean, 3.0);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let means: Vec<WindowMean> = aggregate(Vec::new(), 2).collect();
        assert!(means.is_empty());
    }

    #[test]
    fn test_window_count_is_ceiling() {
        for n in 1..20usize {
            for k in 1..5usize {
                let ratings: Vec<f64> = (0..n).map(|i| i as f64).collect();
                let means: Vec<WindowMean> = aggregate(ratings, k).collect();
                assert_eq!(means.len(), (n + k - 1) / k, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_windows_partition_the_sequence() {
        // With k=1 every window is a single rating, so the means reconstruct
        // the input in order with no gaps or overlaps.
        let ratings = vec![0.5, -1.0, 2.0, 1.25];
        let means: Vec<f64> = aggregate(ratings.clone(), 1).map(|w| w.mean).collect();
        assert_eq!(means, ratings);
    }

    #[test]
    fn test_indices_are_consecutive() {
        let ratings: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let indices: Vec<u64> = aggregate(ratings, 3).map(|w| w.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "window_size")]
    fn test_zero_window_size_panics() {
        let _ = aggregate(vec![1.0], 0);
    }
}
