use core::{
    iter::{Chain, Flatten, FusedIterator},
    slice,
};
use std::vec;

use super::{util::unlikely, Slot, TABLE_A, TABLE_B};

/// Forward walk over the live slots of table A, then table B.
///
/// The cursor spans `0..2 * num_buckets`: positions below `num_buckets` address
/// table A, the rest address table B at `cursor - num_buckets`.
pub(crate) struct RawIter<'a, K, V> {
    tables: &'a [Vec<Slot<K, V>>; 2],
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    #[inline]
    pub(crate) fn new(tables: &'a [Vec<Slot<K, V>>; 2], len: usize) -> Self {
        Self {
            tables,
            cursor: 0,
            remaining: len,
        }
    }
}

impl<K, V> Clone for RawIter<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tables: self.tables,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for RawIter<'a, K, V> {
    type Item = &'a (K, V);

    #[inline]
    fn next(&mut self) -> Option<&'a (K, V)> {
        if unlikely(self.remaining == 0) {
            return None;
        }
        let tables = self.tables;
        let num_buckets = tables[TABLE_A].len();
        while self.cursor < 2 * num_buckets {
            let slot = if self.cursor < num_buckets {
                &tables[TABLE_A][self.cursor]
            } else {
                &tables[TABLE_B][self.cursor - num_buckets]
            };
            self.cursor += 1;
            if let Some(entry) = slot {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for RawIter<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for RawIter<'_, K, V> {}

type SlotsMut<'a, K, V> =
    Flatten<Chain<slice::IterMut<'a, Slot<K, V>>, slice::IterMut<'a, Slot<K, V>>>>;

/// Same order as [`RawIter`], handing out mutable entries.
pub(crate) struct RawIterMut<'a, K, V> {
    inner: SlotsMut<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> RawIterMut<'a, K, V> {
    #[inline]
    pub(crate) fn new(tables: &'a mut [Vec<Slot<K, V>>; 2], len: usize) -> Self {
        let [table_a, table_b] = tables;
        Self {
            inner: table_a.iter_mut().chain(table_b.iter_mut()).flatten(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for RawIterMut<'a, K, V> {
    type Item = &'a mut (K, V);

    #[inline]
    fn next(&mut self) -> Option<&'a mut (K, V)> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for RawIterMut<'_, K, V> {}
impl<K, V> FusedIterator for RawIterMut<'_, K, V> {}

type SlotsOwned<K, V> = Flatten<Chain<vec::IntoIter<Slot<K, V>>, vec::IntoIter<Slot<K, V>>>>;

/// Consuming walk in table order. Entries not yielded are dropped with it.
pub(crate) struct RawIntoIter<K, V> {
    inner: SlotsOwned<K, V>,
    remaining: usize,
}

impl<K, V> RawIntoIter<K, V> {
    #[inline]
    pub(crate) fn new(tables: [Vec<Slot<K, V>>; 2], len: usize) -> Self {
        let [table_a, table_b] = tables;
        Self {
            inner: table_a.into_iter().chain(table_b).flatten(),
            remaining: len,
        }
    }
}

impl<K, V> Iterator for RawIntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for RawIntoIter<K, V> {}
impl<K, V> FusedIterator for RawIntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> [Vec<Slot<u8, char>>; 2] {
        [
            vec![None, Some((1, 'a')), None, Some((2, 'b'))],
            vec![Some((3, 'c')), None, None, Some((4, 'd'))],
        ]
    }

    #[test]
    fn table_a_then_table_b() {
        let tables = tables();
        let keys: Vec<u8> = RawIter::new(&tables, 4).map(|(k, _)| *k).collect();
        assert_eq!(keys, [1, 2, 3, 4]);
    }

    #[test]
    fn exact_size() {
        let tables = tables();
        let mut iter = RawIter::new(&tables, 4);
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn empty_tables() {
        let tables: [Vec<Slot<u8, char>>; 2] = [vec![None, None], vec![None, None]];
        assert_eq!(RawIter::new(&tables, 0).next(), None);
        assert_eq!(RawIntoIter::new(tables, 0).next(), None);
    }

    #[test]
    fn mutable_and_owned_keep_order() {
        let mut tables = tables();
        for (_, v) in RawIterMut::new(&mut tables, 4) {
            *v = v.to_ascii_uppercase();
        }
        let owned: Vec<(u8, char)> = RawIntoIter::new(tables, 4).collect();
        assert_eq!(owned, [(1, 'A'), (2, 'B'), (3, 'C'), (4, 'D')]);
    }
}
