//! Construction of the shift table.
//!
//! After comparing a window against the current best, the scanner knows the
//! compared prefix `s` of the window (up to and including the first differing
//! symbol). The shift of `s` is how far the cursor can advance so that every
//! skipped start position is either provably larger than the best window, or
//! dominated by the start position that is landed on.

use crate::{
    cache::{CacheStore, NoCache},
    table::num_strings,
    Alphabet, Error, Result, ShiftTable, TableSlice,
};
use itertools::{repeat_n, Itertools};
use log::{debug, info};
use std::iter::repeat;

/// Compute the shift value of a single string `s` over `alphabet`.
pub fn shift_value(s: &[u8], alphabet: &Alphabet) -> usize {
    let n = s.len();
    let (low, high) = (alphabet.min(), alphabet.max());

    // Suffix `i` padded with the high symbol: an upper bound on every window starting at `i`.
    let padded_suffix = |i: usize| s[i..].iter().copied().chain(repeat(high)).take(n);
    let mut offset = 0;
    for i in 1..n {
        if padded_suffix(i).lt(padded_suffix(offset)) {
            offset = i;
        }
    }
    if offset > 0 {
        return offset;
    }

    // `s` is its own smallest padded suffix, so only a border can start a
    // smaller window. Take the border whose prefix padded with the low
    // symbol is smallest; ties go to the longer border.
    let padded_border = |b: usize| s[..b].iter().copied().chain(repeat(low)).take(n);
    let mut border = None;
    for b in 1..n {
        if s[..b] != s[n - b..] {
            continue;
        }
        if border.map_or(true, |best| padded_border(b).le(padded_border(best))) {
            border = Some(b);
        }
    }
    border.unwrap_or(n)
}

/// Compute the shifts of all strings of `length` over `alphabet`.
pub fn compute_slice(alphabet: &Alphabet, length: usize) -> Result<TableSlice> {
    if length == 0 {
        return Err(Error::Configuration("slices start at length 1".into()));
    }
    let len = num_strings(alphabet, length)?;
    let mut shifts = Vec::with_capacity(len);
    // `multi_cartesian_product` iterates in lexicographic order, matching `Alphabet::pack`.
    for s in repeat_n(alphabet.symbols().iter().copied(), length).multi_cartesian_product() {
        shifts.push(shift_value(&s, alphabet) as u32);
    }
    debug_assert_eq!(shifts.len(), len);
    // `min^length` can always skip its full length.
    shifts[0] = length as u32;
    Ok(TableSlice {
        alphabet: alphabet.clone(),
        length,
        shifts,
    })
}

/// Builds `ShiftTable`s for one alphabet, reusing slices from a cache.
pub struct ShiftTableBuilder<'c> {
    alphabet: Alphabet,
    cache: &'c dyn CacheStore,
}

impl ShiftTableBuilder<'static> {
    /// A builder that recomputes every slice.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            cache: &NoCache,
        }
    }
}

impl<'c> ShiftTableBuilder<'c> {
    pub fn with_cache<'d>(self, cache: &'d dyn CacheStore) -> ShiftTableBuilder<'d> {
        ShiftTableBuilder {
            alphabet: self.alphabet,
            cache,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Build the table for windows of length `sslen`.
    pub fn build(&self, sslen: usize) -> Result<ShiftTable> {
        if sslen == 0 {
            return Err(Error::Configuration(
                "the window length must be positive".into(),
            ));
        }
        // Fail before computing anything when the largest slice is too large.
        num_strings(&self.alphabet, sslen)?;

        let slices = (1..=sslen)
            .map(|length| self.slice(length))
            .collect::<Result<Vec<_>>>()?;
        let table = ShiftTable::from_slices(self.alphabet.clone(), slices);
        info!(
            "Built shift table: sslen {sslen}, alphabet {}, {} entries",
            self.alphabet,
            table.entries()
        );
        Ok(table)
    }

    fn slice(&self, length: usize) -> Result<TableSlice> {
        if let Some(slice) = self.cache.load(&self.alphabet, length)? {
            slice.validate(&self.alphabet, length)?;
            debug!("Slice {length}: cache hit");
            return Ok(slice);
        }
        debug!("Slice {length}: cache miss, computing");
        let slice = compute_slice(&self.alphabet, length)?;
        self.cache.store(&slice)?;
        Ok(slice)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{cache::MemoryCache, Shift};

    fn value(s: &str) -> usize {
        shift_value(s.as_bytes(), &Alphabet::dna())
    }

    #[test]
    fn smallest_padded_suffix() {
        // `a` starts the smallest suffix.
        assert_eq!(value("tgca"), 3);
        assert_eq!(value("ttta"), 3);
        assert_eq!(value("tga"), 2);
        // Ties keep the earliest offset: `tt` vs `t`+`t`.
        assert_eq!(value("tt"), 1);
    }

    #[test]
    fn borders() {
        assert_eq!(value("c"), 1);
        assert_eq!(value("acgtacgt"), 4);
        assert_eq!(value("aac"), 3);
        assert_eq!(value("ca"), 1);
        assert_eq!(value("cac"), 1);
        // Both have several borders; the shortest padded prefix wins.
        assert_eq!(value("acagcaca"), 1);
        assert_eq!(value("cccccccc"), 1);
        // `a` and `aa` pad to the same prefix; the longer border wins.
        assert_eq!(value("aacaacaa"), 2);
    }

    #[test]
    fn shift_bound() {
        let a = Alphabet::dna();
        let sslen = 6;
        let t = ShiftTableBuilder::new(a.clone()).build(sslen).unwrap();
        for l in 1..=sslen {
            for s in repeat_n(a.symbols().iter().copied(), l).multi_cartesian_product() {
                match t.shift(&s).unwrap() {
                    Shift::Advance(v) => assert!(1 <= v && v <= l, "{s:?} -> {v}"),
                    Shift::Terminal => assert!(l == sslen && a.is_floor(&s), "{s:?}"),
                }
            }
        }
    }

    #[test]
    fn floor_entries() {
        let t = ShiftTableBuilder::new(Alphabet::dna()).build(5).unwrap();
        for l in 1..5 {
            assert_eq!(t.shift(&vec![b'a'; l]), Some(Shift::Advance(l)));
        }
        assert_eq!(t.shift(b"aaaaa"), Some(Shift::Terminal));
    }

    #[test]
    fn invalid_sslen() {
        let b = ShiftTableBuilder::new(Alphabet::dna());
        assert!(matches!(b.build(0), Err(Error::Configuration(_))));
        assert!(matches!(b.build(64), Err(Error::Configuration(_))));
    }

    #[test]
    fn deterministic() {
        let b = ShiftTableBuilder::new(Alphabet::new("acg").unwrap());
        assert_eq!(b.build(5).unwrap(), b.build(5).unwrap());
    }

    #[test]
    fn cached_slices_are_reused() {
        let cache = MemoryCache::default();
        let b = ShiftTableBuilder::new(Alphabet::dna()).with_cache(&cache);
        let t = b.build(4).unwrap();
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.hits(), 0);
        // A longer table only computes the missing slice.
        let t5 = b.build(5).unwrap();
        assert_eq!(cache.hits(), 4);
        assert_eq!(cache.len(), 5);
        assert_eq!(t, b.build(4).unwrap());
        assert_eq!(t5, ShiftTableBuilder::new(Alphabet::dna()).build(5).unwrap());
    }

    #[test]
    fn inconsistent_cache_is_rejected() {
        let a = Alphabet::dna();
        let cache = MemoryCache::default();
        let mut bad = compute_slice(&a, 2).unwrap();
        bad.shifts.pop();
        cache.insert(bad);
        let r = ShiftTableBuilder::new(a).with_cache(&cache).build(3);
        assert!(matches!(r, Err(Error::CacheInconsistency(_))));
    }
}
