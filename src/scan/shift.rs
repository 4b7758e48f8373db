use super::{first_difference, Minimizer, Scanner};
use crate::{Result, Shift, ShiftTable};
use serde::{ser::SerializeStruct, Serialize, Serializer};
use std::{cmp::Ordering, sync::Arc};

/// Skips start positions that cannot hold a smaller window, using a `ShiftTable`.
#[derive(Clone, Debug)]
pub struct ShiftScanner {
    table: Arc<ShiftTable>,
}

impl ShiftScanner {
    pub fn new(table: Arc<ShiftTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ShiftTable {
        &self.table
    }
}

impl Serialize for ShiftScanner {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("ShiftScanner", 3)?;
        st.serialize_field("alphabet", self.table.alphabet())?;
        st.serialize_field("sslen", &self.table.sslen())?;
        st.serialize_field("entries", &self.table.entries())?;
        st.end()
    }
}

#[typetag::serialize]
impl Scanner for ShiftScanner {
    fn sslen(&self) -> usize {
        self.table.sslen()
    }

    fn scan<'s>(&self, seq: &'s [u8]) -> Result<Minimizer<'s>> {
        let k = self.table.sslen();
        let n = seq.len();
        self.table.alphabet().check(seq, k)?;

        // The first window beats the initial sentinel on its first symbol.
        let mut best = 0;
        let mut comparisons = 1;
        let mut matched = 1;
        let mut pos = 0;
        loop {
            if self.table.shift(&seq[best..best + k]) == Some(Shift::Terminal) {
                break;
            }
            // Only `min^sslen` is terminal, and it equals `best` then.
            let mut step = match self.table.shift(&seq[pos..pos + matched]) {
                Some(Shift::Advance(step)) => step,
                other => unreachable!(
                    "compared prefix {:?} has shift {other:?}",
                    String::from_utf8_lossy(&seq[pos..pos + matched])
                ),
            };
            // Shifts assume an unbounded sequence; near the end they may skip the true minimizer.
            if pos + step + k > n {
                step = 1;
            }
            pos += step;
            if pos + k > n {
                break;
            }

            let (compared, order) = first_difference(&seq[pos..pos + k], &seq[best..best + k]);
            comparisons += compared;
            matched = compared;
            if order == Ordering::Less {
                best = pos;
            }
        }
        Ok(Minimizer {
            pos: best,
            kmer: &seq[best..best + k],
            comparisons,
        })
    }
}
