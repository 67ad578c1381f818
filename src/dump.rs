use core::fmt;

use crate::raw::{RawTable, TABLE_A, TABLE_B};

/// Human-readable picture of both tables, slot by slot, followed by the
/// tuning and size counters.
///
/// Returned by [`CuckooMap::dump`](crate::CuckooMap::dump) and
/// [`CuckooSet::dump`](crate::CuckooSet::dump). The exact layout is meant for
/// people, not parsers.
pub struct Dump<'a, K, V, S> {
    raw: &'a RawTable<K, V, S>,
    empty: &'static str,
    entry: fn(&K, &V, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<'a, K, V, S> Dump<'a, K, V, S> {
    pub(crate) fn new(
        raw: &'a RawTable<K, V, S>,
        empty: &'static str,
        entry: fn(&K, &V, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> Self {
        Self { raw, empty, entry }
    }
}

impl<K, V, S> fmt::Display for Dump<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, table) in [("Table A", TABLE_A), ("Table B", TABLE_B)] {
            write!(f, "{name}: [ ")?;
            for slot in &self.raw.tables()[table] {
                match slot {
                    Some((k, v)) => (self.entry)(k, v, f)?,
                    None => f.write_str(self.empty)?,
                }
                f.write_str(" ")?;
            }
            f.write_str("]\n")?;
        }
        write!(
            f,
            "epsilon: {} downsize threshold: {} buckets: {} size: {} max displacement: {}",
            self.raw.params().epsilon(),
            self.raw.params().downsize_threshold(),
            self.raw.num_buckets(),
            self.raw.len(),
            self.raw.max_displacement()
        )
    }
}

impl<K, V, S> fmt::Debug for Dump<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
