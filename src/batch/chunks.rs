//! Chunking iterator adapter.

/// Yields consecutive owned chunks of at most `size` items.
///
/// The final chunk may be shorter. Items are pulled from the inner iterator
/// lazily, one chunk per call to `next`.
#[derive(Debug, Clone)]
pub struct Chunked<I> {
    iter: I,
    size: usize,
}

impl<I: Iterator> Chunked<I> {
    /// A `size` of zero is treated as one.
    pub fn new(iter: I, size: usize) -> Self {
        Self {
            iter,
            size: size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.size
    }
}

impl<I: Iterator> Iterator for Chunked<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.iter.by_ref().take(self.size).collect();
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        (lo.div_ceil(self.size), hi.map(|h| h.div_ceil(self.size)))
    }
}

/// Extension trait adding [`Chunked`] to every iterator.
pub trait ChunkedExt: Iterator + Sized {
    fn chunked(self, size: usize) -> Chunked<Self> {
        Chunked::new(self, size)
    }
}

impl<I: Iterator> ChunkedExt for I {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunked_last_chunk_shorter() {
        let chunks: Vec<Vec<i32>> = (1..=7).chunked(3).collect();
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn test_chunked_exact_multiple() {
        let chunks: Vec<Vec<i32>> = (1..=6).chunked(2).collect();
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_chunked_size_larger_than_input() {
        let chunks: Vec<Vec<&str>> = ["a", "b"].into_iter().chunked(10).collect();
        assert_eq!(chunks, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_chunked_empty_input() {
        let mut chunks = std::iter::empty::<u8>().chunked(4);
        assert!(chunks.next().is_none());
    }

    #[test]
    fn test_chunked_zero_size_clamped() {
        let chunked = (0..3).chunked(0);
        assert_eq!(chunked.chunk_size(), 1);
        assert_eq!(chunked.count(), 3);
    }

    #[test]
    fn test_chunked_size_hint() {
        let chunked = (0..10).chunked(4);
        assert_eq!(chunked.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_chunked_is_lazy() {
        let mut pulled = 0;
        let mut chunks = (0..100).inspect(|_| pulled += 1).chunked(5);
        let first = chunks.next();
        assert_eq!(first, Some(vec![0, 1, 2, 3, 4]));
        drop(chunks);
        assert_eq!(pulled, 5);
    }
}
