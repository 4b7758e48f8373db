use crate::{Alphabet, Error, Result};
use serde::{Deserialize, Serialize};

/// Stored in place of a shift for `min^sslen`. Never a valid shift.
const TERMINAL: u32 = 0;

/// The result of a table lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    /// Advance the scan cursor by this many positions.
    Advance(usize),
    /// The window consists of the smallest symbol only; nothing can be smaller.
    Terminal,
}

/// The shift values of all strings of one length, indexed by `Alphabet::pack`.
///
/// Slices do not depend on the window length, so they are the unit of caching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSlice {
    pub alphabet: Alphabet,
    pub length: usize,
    pub shifts: Vec<u32>,
}

impl TableSlice {
    /// Make sure this slice can be used for strings of `length` over `alphabet`.
    pub fn validate(&self, alphabet: &Alphabet, length: usize) -> Result<()> {
        if self.alphabet != *alphabet {
            return Err(Error::CacheInconsistency(format!(
                "slice for alphabet {} requested for alphabet {alphabet}",
                self.alphabet
            )));
        }
        if self.length != length {
            return Err(Error::CacheInconsistency(format!(
                "slice of length {} requested for length {length}",
                self.length
            )));
        }
        let expected = num_strings(alphabet, length)?;
        if self.shifts.len() != expected {
            return Err(Error::CacheInconsistency(format!(
                "slice of length {length} has {} entries instead of {expected}",
                self.shifts.len()
            )));
        }
        if let Some(idx) = self
            .shifts
            .iter()
            .position(|&v| v == TERMINAL || v as usize > length)
        {
            return Err(Error::CacheInconsistency(format!(
                "slice of length {length} holds shift {} at index {idx}",
                self.shifts[idx]
            )));
        }
        Ok(())
    }
}

/// Number of strings of `length` over `alphabet`.
pub(crate) fn num_strings(alphabet: &Alphabet, length: usize) -> Result<usize> {
    num::checked_pow(alphabet.len(), length).ok_or_else(|| {
        Error::Configuration(format!(
            "{}^{length} strings do not fit in memory",
            alphabet.len()
        ))
    })
}

/// Maps every string of length `1..=sslen` to the distance the scanner may
/// skip ahead after comparing exactly that prefix of a window.
///
/// Immutable once built; share it between scanners with an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftTable {
    alphabet: Alphabet,
    /// `slices[l-1]` holds the strings of length `l`.
    slices: Vec<Vec<u32>>,
}

impl ShiftTable {
    /// Merge validated slices for lengths `1..=sslen`, in order.
    pub(crate) fn from_slices(alphabet: Alphabet, slices: Vec<TableSlice>) -> Self {
        let mut slices: Vec<Vec<u32>> = slices.into_iter().map(|s| s.shifts).collect();
        if let Some(last) = slices.last_mut() {
            // `min^sslen` packs to index 0.
            last[0] = TERMINAL;
        }
        Self { alphabet, slices }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The window length this table was built for.
    pub fn sslen(&self) -> usize {
        self.slices.len()
    }

    /// Total number of stored shifts.
    pub fn entries(&self) -> usize {
        self.slices.iter().map(|s| s.len()).sum()
    }

    /// Look up the shift for `s`.
    ///
    /// Returns `None` when `s` is empty, longer than `sslen`, or contains a
    /// symbol outside the alphabet.
    #[inline(always)]
    pub fn shift(&self, s: &[u8]) -> Option<Shift> {
        let slice = self.slices.get(s.len().checked_sub(1)?)?;
        let v = slice[self.alphabet.pack(s)?];
        Some(if v == TERMINAL {
            Shift::Terminal
        } else {
            Shift::Advance(v as usize)
        })
    }
}
