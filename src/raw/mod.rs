//! The two-table cuckoo engine shared by the map and the set.
//!
//! Entries live in one of two tables of `num_buckets` slots each. An entry is
//! either in table A at its primary bucket or in table B at its secondary
//! bucket, so lookups probe at most two slots. Insertion evicts residents back
//! and forth between the tables for a bounded number of rounds; when the bound
//! runs out, both tables double and every entry is replayed.

use core::{
    hash::{BuildHasher, Hash},
    mem,
};

use self::{
    router::HashRouter,
    util::{displacement_bound, likely, unlikely, MIN_BUCKETS, MIN_DISPLACEMENT},
};
use crate::Params;

pub(crate) mod iter;
pub(crate) mod router;
pub(crate) mod util;

/// Index of table A within [`RawTable::tables`].
pub(crate) const TABLE_A: usize = 0;
/// Index of table B within [`RawTable::tables`].
pub(crate) const TABLE_B: usize = 1;

/// One bucket of one table. `None` is an empty slot.
pub(crate) type Slot<K, V> = Option<(K, V)>;

/// Position of a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotIndex {
    pub(crate) table: usize,
    pub(crate) bucket: usize,
}

#[derive(Clone)]
pub(crate) struct RawTable<K, V, S> {
    tables: [Vec<Slot<K, V>>; 2],
    len: usize,
    max_displacement: usize,
    params: Params,
    router: HashRouter<S>,
}

#[inline]
fn empty_table<K, V>(num_buckets: usize) -> Vec<Slot<K, V>> {
    let mut table = Vec::with_capacity(num_buckets);
    table.resize_with(num_buckets, || None);
    table
}

impl<K, V, S> RawTable<K, V, S> {
    pub(crate) fn new(params: Params, router: HashRouter<S>) -> Self {
        Self {
            tables: [empty_table(MIN_BUCKETS), empty_table(MIN_BUCKETS)],
            len: 0,
            max_displacement: MIN_DISPLACEMENT,
            params,
            router,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn num_buckets(&self) -> usize {
        self.tables[TABLE_A].len()
    }

    #[inline]
    pub(crate) fn max_displacement(&self) -> usize {
        self.max_displacement
    }

    #[inline]
    pub(crate) fn params(&self) -> Params {
        self.params
    }

    #[inline]
    pub(crate) fn router(&self) -> &HashRouter<S> {
        &self.router
    }

    /// Live entries over total slots of both tables.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn load_factor(&self) -> f64 {
        self.len as f64 / (2 * self.num_buckets()) as f64
    }

    #[inline]
    pub(crate) fn tables(&self) -> &[Vec<Slot<K, V>>; 2] {
        &self.tables
    }

    #[inline]
    pub(crate) fn tables_mut(&mut self) -> &mut [Vec<Slot<K, V>>; 2] {
        &mut self.tables
    }

    #[inline]
    pub(crate) fn slot(&self, index: SlotIndex) -> Option<&(K, V)> {
        self.tables[index.table][index.bucket].as_ref()
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: SlotIndex) -> Option<&mut (K, V)> {
        self.tables[index.table][index.bucket].as_mut()
    }

    /// Drops every entry and goes back to the initial two-bucket geometry.
    pub(crate) fn clear(&mut self) {
        log_debug!(
            "cuckoo table cleared: {} entries, {} buckets released",
            self.len,
            self.num_buckets()
        );
        self.tables = [empty_table(MIN_BUCKETS), empty_table(MIN_BUCKETS)];
        self.len = 0;
        self.max_displacement = MIN_DISPLACEMENT;
    }

    /// Empties both tables, handing back the live entries in table order.
    fn take_entries(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len);
        let [table_a, table_b] = &mut self.tables;
        entries.extend(table_a.iter_mut().chain(table_b.iter_mut()).filter_map(Option::take));
        entries
    }

    #[inline]
    fn update_displacement_bound(&mut self) {
        self.max_displacement = displacement_bound(self.len, self.params.epsilon());
    }

    pub(crate) fn into_tables(self) -> [Vec<Slot<K, V>>; 2] {
        self.tables
    }
}

impl<K, V, S: BuildHasher> RawTable<K, V, S> {
    /// Searches both candidate slots for an entry matching `eq`.
    ///
    /// `hash` is the primary hash of the searched key. The secondary hash is
    /// derived from it, so the key itself is hashed only once.
    #[inline]
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&(K, V)) -> bool) -> Option<SlotIndex> {
        let num_buckets = self.num_buckets();
        let bucket = self.router.primary_bucket(hash, num_buckets);
        if let Some(entry) = &self.tables[TABLE_A][bucket] {
            if likely(eq(entry)) {
                return Some(SlotIndex {
                    table: TABLE_A,
                    bucket,
                });
            }
        }
        let bucket = self.router.secondary_bucket(hash, num_buckets);
        match &self.tables[TABLE_B][bucket] {
            Some(entry) if eq(entry) => Some(SlotIndex {
                table: TABLE_B,
                bucket,
            }),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn get(&self, hash: u64, eq: impl FnMut(&(K, V)) -> bool) -> Option<&(K, V)> {
        // Avoid `Option::map` because it bloats LLVM IR.
        match self.find(hash, eq) {
            Some(index) => self.slot(index),
            None => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(
        &mut self,
        hash: u64,
        eq: impl FnMut(&(K, V)) -> bool,
    ) -> Option<&mut (K, V)> {
        match self.find(hash, eq) {
            Some(index) => self.slot_mut(index),
            None => None,
        }
    }

    /// Inserts an entry whose key is known to be absent.
    ///
    /// Runs the eviction chain; if the displacement bound runs out, doubles
    /// the tables and tries again with whatever entry was left homeless.
    pub(crate) fn insert_new(&mut self, entry: (K, V))
    where
        K: Hash,
    {
        let mut entry = entry;
        loop {
            match self.place(entry) {
                Ok(()) => break,
                Err(homeless) => {
                    entry = homeless;
                    log_debug!(
                        "displacement bound {} exhausted at {} entries, growing {} -> {} buckets",
                        self.max_displacement,
                        self.len,
                        self.num_buckets(),
                        self.num_buckets() * 2
                    );
                    self.rehash(self.num_buckets() * 2);
                }
            }
        }
        self.len += 1;
        self.update_displacement_bound();
    }

    /// Cuckoo eviction chain bounded by `max_displacement` rounds.
    ///
    /// Each round tries table A at the candidate's primary bucket, then table
    /// B at its secondary bucket, swapping the candidate with the resident
    /// whenever the slot is taken. The hashes of every new candidate are
    /// recomputed from its key. On exhaustion the entry that is still without
    /// a slot is returned; it need not be the one passed in.
    fn place(&mut self, mut entry: (K, V)) -> Result<(), (K, V)>
    where
        K: Hash,
    {
        let num_buckets = self.num_buckets();
        for _ in 0..self.max_displacement {
            let hash = self.router.primary_hash(&entry.0);
            let bucket = self.router.primary_bucket(hash, num_buckets);
            let slot = &mut self.tables[TABLE_A][bucket];
            match slot {
                Some(resident) => mem::swap(resident, &mut entry),
                None => {
                    *slot = Some(entry);
                    return Ok(());
                }
            }

            let hash = self.router.primary_hash(&entry.0);
            let bucket = self.router.secondary_bucket(hash, num_buckets);
            let slot = &mut self.tables[TABLE_B][bucket];
            match slot {
                Some(resident) => mem::swap(resident, &mut entry),
                None => {
                    *slot = Some(entry);
                    return Ok(());
                }
            }
        }
        Err(entry)
    }

    /// Rebuilds both tables with `num_buckets` buckets each and replays every
    /// live entry into them.
    ///
    /// The entry count and displacement bound are untouched. If the replay
    /// cannot place an entry within the bound, the target size doubles and the
    /// replay starts over, so this always ends with every entry placed.
    pub(crate) fn rehash(&mut self, num_buckets: usize)
    where
        K: Hash,
    {
        debug_assert!(num_buckets.is_power_of_two());
        let mut num_buckets = num_buckets.max(MIN_BUCKETS);
        let mut pending = self.take_entries();
        loop {
            self.tables = [empty_table(num_buckets), empty_table(num_buckets)];
            let mut replay = pending.into_iter();
            let homeless = replay.by_ref().find_map(|entry| self.place(entry).err());
            match homeless {
                None => return,
                Some(entry) => {
                    log_trace!(
                        "replay into {} buckets exhausted the bound, growing again",
                        num_buckets
                    );
                    let rest = replay;
                    pending = self.take_entries();
                    pending.push(entry);
                    pending.extend(rest);
                    num_buckets *= 2;
                }
            }
        }
    }

    /// Removes the entry at `index`, then shrinks the tables if the load
    /// factor fell below the downsize threshold.
    pub(crate) fn remove(&mut self, index: SlotIndex) -> Option<(K, V)>
    where
        K: Hash,
    {
        let entry = self.tables[index.table][index.bucket].take()?;
        self.len -= 1;
        self.update_displacement_bound();

        let num_buckets = self.num_buckets();
        if unlikely(
            num_buckets > MIN_BUCKETS
                && self.load_factor() < f64::from(self.params.downsize_threshold()),
        ) {
            log_debug!(
                "load factor {:.3} under {}, shrinking {} -> {} buckets",
                self.load_factor(),
                self.params.downsize_threshold(),
                num_buckets,
                num_buckets / 2
            );
            self.rehash(num_buckets / 2);
        }
        Some(entry)
    }

    #[inline]
    pub(crate) fn remove_entry(
        &mut self,
        hash: u64,
        eq: impl FnMut(&(K, V)) -> bool,
    ) -> Option<(K, V)>
    where
        K: Hash,
    {
        match self.find(hash, eq) {
            Some(index) => self.remove(index),
            None => None,
        }
    }
}
