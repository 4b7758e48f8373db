mod naive;
mod shift;

pub use naive::*;
pub use shift::*;

use crate::Result;
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, iter::zip};

/// The lexicographically smallest window of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Minimizer<'s> {
    /// Start of the reported occurrence.
    pub pos: usize,
    #[serde(serialize_with = "as_str")]
    pub kmer: &'s [u8],
    /// Number of symbol comparisons performed to find it.
    pub comparisons: usize,
}

fn as_str<S: Serializer>(kmer: &[u8], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(kmer))
}

/// Finds the minimizer of a sequence for a fixed window length.
#[typetag::serialize(tag = "scanner")]
pub trait Scanner {
    fn sslen(&self) -> usize;

    fn scan<'s>(&self, seq: &'s [u8]) -> Result<Minimizer<'s>>;
}

/// Compare `window` to `best` symbol by symbol up to the first difference.
///
/// Returns the number of compared symbols and the order of the window relative to `best`.
#[inline(always)]
fn first_difference(window: &[u8], best: &[u8]) -> (usize, Ordering) {
    for (i, (c, b)) in zip(window, best).enumerate() {
        match c.cmp(b) {
            Ordering::Equal => {}
            o => return (i + 1, o),
        }
    }
    (window.len(), Ordering::Equal)
}
