use std::collections::BTreeMap;
use std::io::{self, BufReader, Read};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Occurrence count per symbol.
///
/// Keys iterate in ascending code order. Both sides of a round trip rely on
/// that order to build the same tree from equal maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every byte of `bytes`, then adds the end-of-payload marker.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut map = Self::new();
        for &b in bytes {
            map.increment(Symbol::Byte(b));
        }
        map.finish_scan()
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Counts the bytes of a reader until end of input.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut map = Self::new();
        for b in BufReader::new(reader).bytes() {
            map.increment(Symbol::Byte(b?));
        }
        Ok(map.finish_scan())
    }

    fn finish_scan(mut self) -> Self {
        self.put(Symbol::PseudoEof, 1);
        debug!(
            "counted {} bytes over {} distinct symbols",
            self.total() - 1,
            self.len()
        );
        trace!("frequency map: {}", self);
        self
    }

    /// Inserts or overwrites the count of `symbol`.
    pub fn put(&mut self, symbol: Symbol, count: u64) {
        self.counts.insert(symbol, count);
    }

    pub fn increment(&mut self, symbol: Symbol) {
        *self.counts.entry(symbol).or_default() += 1;
    }

    pub fn get(&self, symbol: Symbol) -> Result<u64> {
        self.counts
            .get(&symbol)
            .copied()
            .ok_or(Error::KeyNotFound(symbol))
    }

    pub fn contains_key(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    pub fn keys(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.counts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |acc, &c| acc.saturating_add(c))
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
