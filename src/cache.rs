//! Stores for precomputed table slices.
//!
//! The builder treats a store as an opaque map from (alphabet, length) to a
//! `TableSlice`, and validates whatever it loads.

use crate::{Alphabet, Error, Result, TableSlice};
use log::debug;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

pub trait CacheStore {
    fn load(&self, alphabet: &Alphabet, length: usize) -> Result<Option<TableSlice>>;
    fn store(&self, slice: &TableSlice) -> Result<()>;
}

/// Never hits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl CacheStore for NoCache {
    fn load(&self, _alphabet: &Alphabet, _length: usize) -> Result<Option<TableSlice>> {
        Ok(None)
    }
    fn store(&self, _slice: &TableSlice) -> Result<()> {
        Ok(())
    }
}

/// Keeps slices in memory for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slices: RefCell<HashMap<(Alphabet, usize), TableSlice>>,
    hits: Cell<usize>,
}

impl MemoryCache {
    /// Insert a slice under its own alphabet and length, without validation.
    pub fn insert(&self, slice: TableSlice) {
        self.slices
            .borrow_mut()
            .insert((slice.alphabet.clone(), slice.length), slice);
    }

    /// Number of stored slices.
    pub fn len(&self) -> usize {
        self.slices.borrow().len()
    }

    /// Number of successful loads.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
}

impl CacheStore for MemoryCache {
    fn load(&self, alphabet: &Alphabet, length: usize) -> Result<Option<TableSlice>> {
        let slice = self
            .slices
            .borrow()
            .get(&(alphabet.clone(), length))
            .cloned();
        if slice.is_some() {
            self.hits.set(self.hits.get() + 1);
        }
        Ok(slice)
    }

    fn store(&self, slice: &TableSlice) -> Result<()> {
        self.insert(slice.clone());
        Ok(())
    }
}

/// One JSON file per slice in a directory.
#[derive(Clone, Debug)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    /// Use `dir` as cache directory, creating it when needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the slice of `length` over `alphabet`.
    ///
    /// The alphabet is hashed, since its symbols need not be valid in file names.
    pub fn path(&self, alphabet: &Alphabet, length: usize) -> PathBuf {
        let h = wyhash::wyhash(alphabet.symbols(), 0);
        self.dir.join(format!("table-{h:016x}-{length}.json"))
    }
}

impl CacheStore for DirCache {
    fn load(&self, alphabet: &Alphabet, length: usize) -> Result<Option<TableSlice>> {
        let path = self.path(alphabet, length);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let slice = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::CacheInconsistency(format!("{} is not a table slice: {e}", path.display()))
        })?;
        debug!("Loaded {}", path.display());
        Ok(Some(slice))
    }

    fn store(&self, slice: &TableSlice) -> Result<()> {
        let path = self.path(&slice.alphabet, slice.length);
        // Written next to the target and renamed into place. Dropping `tmp` on
        // any error removes the partial file.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, slice)?;
            writer.flush()?;
        }
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!("Stored {}", path.display());
        Ok(())
    }
}
