//! Run two scanners over a corpus and compare their results.

use crate::{Error, Minimizer, Result, Scanner};
use log::warn;
use serde::Serialize;
use std::cmp::Reverse;

/// The results of both scanners on one read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison<'s> {
    pub read: usize,
    pub reference: Minimizer<'s>,
    pub candidate: Minimizer<'s>,
}

impl Comparison<'_> {
    /// Scanners agree when they find the same kmer; positions of ties may differ.
    pub fn agrees(&self) -> bool {
        self.reference.kmer == self.candidate.kmer
    }
}

/// Scan every read with both scanners.
pub fn compare<'s, R: AsRef<[u8]>>(
    reads: &'s [R],
    reference: &dyn Scanner,
    candidate: &dyn Scanner,
) -> Result<Vec<Comparison<'s>>> {
    if reference.sslen() != candidate.sslen() {
        return Err(Error::Configuration(format!(
            "scanners use window lengths {} and {}",
            reference.sslen(),
            candidate.sslen()
        )));
    }
    reads
        .iter()
        .enumerate()
        .map(|(read, seq)| -> Result<Comparison<'s>> {
            let seq = seq.as_ref();
            Ok(Comparison {
                read,
                reference: reference.scan(seq)?,
                candidate: candidate.scan(seq)?,
            })
        })
        .collect()
}

/// Aggregate comparison counts of one scanner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// First read needing the fewest comparisons.
    pub best_read: usize,
    /// First read needing the most comparisons.
    pub worst_read: usize,
}

impl Stats {
    pub fn from_counts(counts: &[usize]) -> Self {
        let Some((best_read, &min)) = counts.iter().enumerate().min_by_key(|&(i, c)| (c, i))
        else {
            return Self::default();
        };
        let Some((worst_read, &max)) = counts
            .iter()
            .enumerate()
            .max_by_key(|&(i, c)| (c, Reverse(i)))
        else {
            return Self::default();
        };
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        Self {
            min,
            max,
            mean,
            best_read,
            worst_read,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disagreement {
    pub read: usize,
    pub reference: String,
    pub candidate: String,
}

#[derive(Serialize)]
pub struct Side<'a> {
    pub scanner: &'a (dyn Scanner + 'static),
    pub stats: Stats,
    /// The minimizer this scanner found on `stats.best_read`.
    pub best_kmer: String,
    /// The minimizer this scanner found on `stats.worst_read`.
    pub worst_kmer: String,
}

impl<'a> Side<'a> {
    fn new<'s>(
        scanner: &'a (dyn Scanner + 'static),
        minimizers: impl Iterator<Item = Minimizer<'s>> + Clone,
    ) -> Self {
        let counts: Vec<_> = minimizers.clone().map(|m| m.comparisons).collect();
        let stats = Stats::from_counts(&counts);
        let kmer = |read| {
            minimizers
                .clone()
                .nth(read)
                .map(|m| String::from_utf8_lossy(m.kmer).into_owned())
                .unwrap_or_default()
        };
        Self {
            scanner,
            best_kmer: kmer(stats.best_read),
            worst_kmer: kmer(stats.worst_read),
            stats,
        }
    }
}

#[derive(Serialize)]
pub struct Report<'a> {
    pub reads: usize,
    /// Number of reads on which the scanners disagree.
    pub wrong: usize,
    pub reference: Side<'a>,
    pub candidate: Side<'a>,
    pub disagreements: Vec<Disagreement>,
}

pub fn summarize<'a>(
    comparisons: &[Comparison],
    reference: &'a (dyn Scanner + 'static),
    candidate: &'a (dyn Scanner + 'static),
) -> Report<'a> {
    let disagreements: Vec<_> = comparisons
        .iter()
        .filter(|c| !c.agrees())
        .map(|c| Disagreement {
            read: c.read,
            reference: String::from_utf8_lossy(c.reference.kmer).into_owned(),
            candidate: String::from_utf8_lossy(c.candidate.kmer).into_owned(),
        })
        .collect();
    for d in &disagreements {
        warn!(
            "Read {}: reference found {}, candidate found {}",
            d.read, d.reference, d.candidate
        );
    }
    Report {
        reads: comparisons.len(),
        wrong: disagreements.len(),
        reference: Side::new(reference, comparisons.iter().map(|c| c.reference)),
        candidate: Side::new(candidate, comparisons.iter().map(|c| c.candidate)),
        disagreements,
    }
}

/// `compare` followed by `summarize`.
pub fn run<'a, R: AsRef<[u8]>>(
    reads: &[R],
    reference: &'a (dyn Scanner + 'static),
    candidate: &'a (dyn Scanner + 'static),
) -> Result<Report<'a>> {
    let comparisons = compare(reads, reference, candidate)?;
    Ok(summarize(&comparisons, reference, candidate))
}
