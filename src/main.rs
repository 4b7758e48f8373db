use std::{path::PathBuf, sync::Arc, time::Instant};

use clap::Parser;
use log::info;
use serde::Serialize;
use shiftmin::{
    corpus::random_reads, harness, Alphabet, CacheStore, DirCache, Minimizer, NaiveScanner,
    NoCache, Result, Scanner, ShiftScanner, ShiftTableBuilder,
};

#[derive(clap::Args)]
struct TableArgs {
    /// Minimizer length.
    #[arg(short)]
    k: usize,
    /// Alphabet symbols.
    #[arg(short, long, default_value = "acgt")]
    alphabet: Alphabet,
    /// Directory to cache shift table slices in.
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Compare both scanners on random reads.
    Compare {
        #[command(flatten)]
        table: TableArgs,
        /// Number of reads.
        #[arg(short, default_value_t = 1000)]
        n: usize,
        /// Read length.
        #[arg(short, default_value_t = 100)]
        l: usize,
        #[arg(long, default_value_t = 213456)]
        seed: u64,
        /// Include the list of disagreeing reads in the output.
        #[arg(long)]
        show_disagreements: bool,
    },
    /// Find the minimizer of the given reads with both scanners.
    Scan {
        #[command(flatten)]
        table: TableArgs,
        reads: Vec<String>,
    },
    /// Fill the cache with the slices for `k`.
    Build {
        #[command(flatten)]
        table: TableArgs,
    },
}

/// Find lexicographic minimizers using a precomputed shift table.
#[derive(clap::Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Serialize)]
struct ScanResult<'s> {
    read: &'s str,
    naive: Minimizer<'s>,
    shift: Minimizer<'s>,
    agree: bool,
}

fn scanners(args: &TableArgs) -> Result<(NaiveScanner, ShiftScanner)> {
    let cache: Box<dyn CacheStore> = match &args.cache_dir {
        Some(dir) => Box::new(DirCache::new(dir)?),
        None => Box::new(NoCache),
    };
    let start = Instant::now();
    let table = ShiftTableBuilder::new(args.alphabet.clone())
        .with_cache(&*cache)
        .build(args.k)?;
    info!("Table ready in {:.2?}", start.elapsed());
    Ok((
        NaiveScanner::new(args.alphabet.clone(), args.k)?,
        ShiftScanner::new(Arc::new(table)),
    ))
}

fn main() -> Result<()> {
    color_backtrace::install();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Compare {
            table,
            n,
            l,
            seed,
            show_disagreements,
        } => {
            let (naive, shift) = scanners(&table)?;
            let reads = random_reads(n, l, &table.alphabet, seed);
            info!("Comparing scanners on {n} reads of length {l}");
            let mut report = harness::run(&reads, &naive, &shift)?;
            info!(
                "Wrong: {}  naive mean {:.2}  shift mean {:.2}",
                report.wrong, report.reference.stats.mean, report.candidate.stats.mean
            );
            if let Some(worst) = reads.get(report.candidate.stats.worst_read) {
                info!(
                    "Worst read for the shift scanner needs {} comparisons: {}",
                    report.candidate.stats.max,
                    String::from_utf8_lossy(worst)
                );
            }
            if !show_disagreements {
                report.disagreements.clear();
            }
            println!("{}", serde_json::to_string(&report)?);
        }
        Command::Scan { table, reads } => {
            let (naive, shift) = scanners(&table)?;
            for read in &reads {
                let n = naive.scan(read.as_bytes())?;
                let s = shift.scan(read.as_bytes())?;
                let result = ScanResult {
                    read,
                    naive: n,
                    shift: s,
                    agree: n.kmer == s.kmer,
                };
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Command::Build { table } => {
            let (_, shift) = scanners(&table)?;
            info!("{} shifts for k={}", shift.table().entries(), table.k);
        }
    }
    Ok(())
}
