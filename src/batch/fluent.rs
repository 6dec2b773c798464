//! A small fluent wrapper over iterators.
//!
//! `Fluent` exists so that wave scheduling reads as a pipeline:
//! `Fluent::new(producers).chunk(limit).map(start_wave)` followed by a
//! sequential await of each wave, then `flatten`.

use super::chunks::Chunked;

#[derive(Debug, Clone)]
pub struct Fluent<I> {
    iter: I,
}

impl<I: Iterator> Fluent<I> {
    pub fn new<T>(items: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: items.into_iter(),
        }
    }

    /// Group items into owned chunks of `size` (zero is treated as one).
    pub fn chunk(self, size: usize) -> Fluent<Chunked<I>> {
        Fluent {
            iter: Chunked::new(self.iter, size),
        }
    }

    pub fn map<B, F>(self, f: F) -> Fluent<std::iter::Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Fluent {
            iter: self.iter.map(f),
        }
    }

    pub fn filter<P>(self, predicate: P) -> Fluent<std::iter::Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Fluent {
            iter: self.iter.filter(predicate),
        }
    }

    /// Flatten one level of nesting.
    pub fn flatten(self) -> Fluent<std::iter::Flatten<I>>
    where
        I::Item: IntoIterator,
    {
        Fluent {
            iter: self.iter.flatten(),
        }
    }

    pub fn to_vec(self) -> Vec<I::Item> {
        self.iter.collect()
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: Iterator> Iterator for Fluent<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_map_flatten_roundtrip() {
        let out = Fluent::new(1..=5)
            .chunk(2)
            .map(|c| c.into_iter().map(|x| x * 10).collect::<Vec<_>>())
            .flatten()
            .to_vec();
        assert_eq!(out, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_chunk_shapes() {
        let chunks = Fluent::new(vec!['a', 'b', 'c']).chunk(2).to_vec();
        assert_eq!(chunks, vec![vec!['a', 'b'], vec!['c']]);
    }

    #[test]
    fn test_filter_and_iterator_impl() {
        let mut evens = Fluent::new(0..10).filter(|x| x % 2 == 0);
        assert_eq!(evens.next(), Some(0));
        assert_eq!(evens.into_inner().collect::<Vec<_>>(), vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_empty() {
        let out = Fluent::new(Vec::<u32>::new()).chunk(3).to_vec();
        assert!(out.is_empty());
    }
}
