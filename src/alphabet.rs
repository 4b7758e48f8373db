use crate::{Error, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered, duplicate-free set of byte symbols.
///
/// Symbols are ordered by byte value, so `"tgca"` and `"acgt"` describe the
/// same alphabet. The smallest symbol is the low pad symbol, the largest the
/// high pad symbol.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct Alphabet {
    symbols: Vec<u8>,
    /// The rank of each byte, if it is part of the alphabet.
    ranks: [Option<u8>; 256],
}

impl Alphabet {
    pub fn new(symbols: impl AsRef<[u8]>) -> Result<Self> {
        let mut symbols = symbols.as_ref().to_vec();
        if symbols.is_empty() {
            return Err(Error::Configuration("the alphabet is empty".into()));
        }
        symbols.sort_unstable();
        if let Some((&c, _)) = symbols.iter().tuple_windows().find(|(a, b)| a == b) {
            return Err(Error::Configuration(format!(
                "symbol {:?} occurs more than once in the alphabet",
                char::from(c)
            )));
        }
        // At most 256 distinct bytes, so ranks fit in a u8.
        let mut ranks = [None; 256];
        for (r, &c) in symbols.iter().enumerate() {
            ranks[c as usize] = Some(r as u8);
        }
        Ok(Self { symbols, ranks })
    }

    /// The DNA alphabet `acgt`.
    pub fn dna() -> Self {
        Self::new("acgt").expect("acgt is a valid alphabet")
    }

    /// Alphabet size.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// The smallest symbol.
    #[inline(always)]
    pub fn min(&self) -> u8 {
        self.symbols[0]
    }

    /// The largest symbol.
    #[inline(always)]
    pub fn max(&self) -> u8 {
        self.symbols[self.symbols.len() - 1]
    }

    /// The symbols in increasing order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline(always)]
    pub fn rank(&self, c: u8) -> Option<usize> {
        self.ranks[c as usize].map(|r| r as usize)
    }

    /// Returns the integer value of a string, i.e. its index among all
    /// strings of the same length in lexicographic order.
    #[inline(always)]
    pub fn pack(&self, s: &[u8]) -> Option<usize> {
        let sigma = self.len();
        s.iter()
            .try_fold(0, |v, &c| Some(sigma * v + self.rank(c)?))
    }

    /// True when `s` consists of the smallest symbol only.
    #[inline(always)]
    pub fn is_floor(&self, s: &[u8]) -> bool {
        s.iter().all(|&c| c == self.min())
    }

    /// Check that `seq` is a valid input for windows of length `sslen`.
    pub fn check(&self, seq: &[u8], sslen: usize) -> Result<()> {
        if seq.len() < sslen {
            return Err(Error::ShortSequence {
                len: seq.len(),
                sslen,
            });
        }
        match seq.iter().position(|&c| self.rank(c).is_none()) {
            Some(pos) => Err(Error::ForeignSymbol {
                symbol: char::from(seq[pos]),
                pos,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.symbols))
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({self})")
    }
}

impl From<Alphabet> for Vec<u8> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols
    }
}

impl TryFrom<Vec<u8>> for Alphabet {
    type Error = Error;

    fn try_from(symbols: Vec<u8>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl std::str::FromStr for Alphabet {
    type Err = Error;

    fn from_str(symbols: &str) -> Result<Self> {
        Self::new(symbols)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sorted_order() {
        let a = Alphabet::new("tgca").unwrap();
        assert_eq!(a, Alphabet::dna());
        assert_eq!(a.symbols(), b"acgt");
        assert_eq!(a.min(), b'a');
        assert_eq!(a.max(), b't');
        assert_eq!(a.rank(b'g'), Some(2));
        assert_eq!(a.rank(b'n'), None);
    }

    #[test]
    fn invalid() {
        assert!(matches!(Alphabet::new(""), Err(Error::Configuration(_))));
        assert!(matches!(Alphabet::new("acga"), Err(Error::Configuration(_))));
    }

    #[test]
    fn pack_is_lexicographic_rank() {
        let a = Alphabet::dna();
        assert_eq!(a.pack(b"aaa"), Some(0));
        assert_eq!(a.pack(b"aac"), Some(1));
        assert_eq!(a.pack(b"ca"), Some(4));
        assert_eq!(a.pack(b"ttt"), Some(63));
        assert_eq!(a.pack(b"anc"), None);
    }

    #[test]
    fn check_sequence() {
        let a = Alphabet::dna();
        assert!(a.check(b"acgt", 4).is_ok());
        assert!(matches!(
            a.check(b"acg", 4),
            Err(Error::ShortSequence { len: 3, sslen: 4 })
        ));
        assert!(matches!(
            a.check(b"acnt", 2),
            Err(Error::ForeignSymbol { symbol: 'n', pos: 2 })
        ));
    }

    #[test]
    fn all_bytes() {
        let a = Alphabet::new((0..=255u8).rev().collect::<Vec<_>>()).unwrap();
        assert_eq!(a.len(), 256);
        assert_eq!((a.min(), a.max()), (0, 255));
        assert_eq!(a.rank(255), Some(255));
        assert_eq!(a.pack(&[1, 255]), Some(256 + 255));
    }

    #[test]
    fn serde_as_bytes() {
        let a = Alphabet::new("ca").unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[97,99]");
        assert_eq!(serde_json::from_str::<Alphabet>(&json).unwrap(), a);
        assert!(serde_json::from_str::<Alphabet>("[97,97]").is_err());

        let high = Alphabet::new([b'a', 0xff]).unwrap();
        let json = serde_json::to_string(&high).unwrap();
        assert_eq!(json, "[97,255]");
        assert_eq!(serde_json::from_str::<Alphabet>(&json).unwrap(), high);
    }
}
