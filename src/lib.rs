//! Lexicographic minimizers with shift-table skipping.
//!
//! The minimizer of a sequence is its lexicographically smallest window of
//! length `sslen`. `NaiveScanner` compares every window with the best one so
//! far. `ShiftScanner` uses a precomputed `ShiftTable` to skip start positions
//! that provably cannot hold a smaller window, which needs fewer symbol
//! comparisons on average.
//!
//! ```no_run
//! use shiftmin::{Alphabet, Scanner, ShiftScanner, ShiftTableBuilder};
//! use std::sync::Arc;
//!
//! let table = ShiftTableBuilder::new(Alphabet::dna()).build(8)?;
//! let scanner = ShiftScanner::new(Arc::new(table));
//! let m = scanner.scan(b"acacgtctacacaaagcg")?;
//! assert_eq!(m.kmer, b"acaaagcg");
//! # Ok::<(), shiftmin::Error>(())
//! ```

pub mod alphabet;
pub mod builder;
pub mod cache;
pub mod corpus;
mod error;
pub mod harness;
pub mod scan;
pub mod table;

pub use alphabet::Alphabet;
pub use builder::{shift_value, ShiftTableBuilder};
pub use cache::{CacheStore, DirCache, MemoryCache, NoCache};
pub use error::{Error, Result};
pub use scan::{Minimizer, NaiveScanner, Scanner, ShiftScanner};
pub use table::{Shift, ShiftTable, TableSlice};

#[cfg(test)]
#[ctor::ctor]
fn init_color_backtrace() {
    color_backtrace::install();
}
