use super::{first_difference, Minimizer, Scanner};
use crate::{Alphabet, Error, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// Brute force: compare every window against the best one so far.
///
/// Needs `O(n * sslen)` comparisons in the worst case.
#[derive(Clone, Debug, Serialize)]
pub struct NaiveScanner {
    alphabet: Alphabet,
    sslen: usize,
}

impl NaiveScanner {
    pub fn new(alphabet: Alphabet, sslen: usize) -> Result<Self> {
        if sslen == 0 {
            return Err(Error::Configuration(
                "the window length must be positive".into(),
            ));
        }
        Ok(Self { alphabet, sslen })
    }
}

#[typetag::serialize]
impl Scanner for NaiveScanner {
    fn sslen(&self) -> usize {
        self.sslen
    }

    fn scan<'s>(&self, seq: &'s [u8]) -> Result<Minimizer<'s>> {
        let k = self.sslen;
        self.alphabet.check(seq, k)?;

        // The first window beats the initial sentinel on its first symbol.
        let mut best = 0;
        let mut comparisons = 1;
        if !self.alphabet.is_floor(&seq[..k]) {
            for pos in 1..=seq.len() - k {
                let (compared, order) = first_difference(&seq[pos..pos + k], &seq[best..best + k]);
                comparisons += compared;
                if order == Ordering::Less {
                    best = pos;
                    if self.alphabet.is_floor(&seq[pos..pos + k]) {
                        break;
                    }
                }
            }
        }
        Ok(Minimizer {
            pos: best,
            kmer: &seq[best..best + k],
            comparisons,
        })
    }
}
