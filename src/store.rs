//! persistence of the previous sample.
//!
//! each invoking process gets its own snapshot file, named after its pid. a shell that runs this
//! tool on every prompt will therefore see the load since its last prompt. files are overwritten
//! in place and never removed.

use {
    crate::{
        source::Host,
        stat::{Counters, Snapshot, UserHz},
    },
    std::{
        fs::File,
        io::{self, BufRead, BufReader, BufWriter, Write},
        path::{Path, PathBuf},
    },
    tracing::debug,
};

/// identifies the snapshot belonging to a particular invoking process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SnapshotKey(u32);

/// a snapshot file on disk.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("snapshot path {} exceeds {limit} bytes", .path.display())]
    TooLong { path: PathBuf, limit: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("could not read snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("malformed snapshot at line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("could not open {} for writing: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

// === impl SnapshotKey ===

impl SnapshotKey {
    /// the key of this process's parent.
    pub fn parent(host: &impl Host) -> Self {
        Self(host.parent_pid())
    }
}

impl From<u32> for SnapshotKey {
    fn from(pid: u32) -> Self {
        Self(pid)
    }
}

// === impl SnapshotStore ===

impl SnapshotStore {
    const PREFIX: &str = "cpubglinehist_";

    /// the longest path, in bytes, a snapshot may be stored at.
    pub const PATH_LIMIT: usize = 127;

    /// returns the store for `key`, kept in `dir`.
    pub fn new(dir: &Path, SnapshotKey(pid): SnapshotKey) -> Result<Self, PathError> {
        let path = dir.join(format!("{}{pid}", Self::PREFIX));
        if path.as_os_str().len() > Self::PATH_LIMIT {
            return Err(PathError::TooLong {
                path,
                limit: Self::PATH_LIMIT,
            });
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// loads the counters of at most `cores` cores.
    ///
    /// a file with fewer lines yields a shorter snapshot.
    pub fn load(&self, cores: usize) -> Result<Snapshot, LoadError> {
        let Self { path } = self;

        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;

        let mut cpus = Vec::with_capacity(cores);
        for (i, line) in BufReader::new(file).lines().take(cores).enumerate() {
            let line = line?;
            let counters = Self::parse_line(&line).ok_or_else(|| LoadError::Malformed {
                line: i + 1,
                content: line.clone(),
            })?;
            cpus.push(counters);
        }

        debug!(path = %path.display(), cores = cpus.len(), "loaded previous snapshot");
        Ok(Snapshot::from(cpus))
    }

    /// overwrites the stored snapshot.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SaveError> {
        let Self { path } = self;

        let file = File::create(path).map_err(|source| SaveError::Open {
            path: path.clone(),
            source,
        })?;
        let write_err = |source| SaveError::Write {
            path: path.clone(),
            source,
        };

        let mut writer = BufWriter::new(file);
        for Counters { active, inactive } in snapshot.iter() {
            writeln!(writer, "{active} {inactive}").map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        debug!(path = %path.display(), cores = snapshot.len(), "saved snapshot");
        Ok(())
    }

    /// parses an `<active> <inactive>` line.
    fn parse_line(line: &str) -> Option<Counters> {
        let mut tokens = line.split_whitespace().map(str::parse::<UserHz>);
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(Ok(active)), Some(Ok(inactive)), None) => Some(Counters { active, inactive }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::fs, tempfile::TempDir};

    fn counters(active: u64, inactive: u64) -> Counters {
        Counters {
            active: UserHz::new(active),
            inactive: UserHz::new(inactive),
        }
    }

    fn store(dir: &TempDir) -> SnapshotStore {
        SnapshotStore::new(dir.path(), SnapshotKey::from(4242)).unwrap()
    }

    #[test]
    fn path_is_named_after_parent() {
        let store = SnapshotStore::new(Path::new("/tmp"), SnapshotKey::from(17)).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/cpubglinehist_17"));
    }

    #[test]
    fn path_too_long() {
        let dir = PathBuf::from("/").join("d".repeat(SnapshotStore::PATH_LIMIT));
        let err = SnapshotStore::new(&dir, SnapshotKey::from(1)).unwrap_err();
        assert!(matches!(err, PathError::TooLong { limit: 127, .. }));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let snapshot = Snapshot::from(vec![
            counters(100, 0),
            counters(50, 0),
            counters(u64::MAX, 7),
        ]);

        store.save(&snapshot).unwrap();
        assert_eq!(store.load(3).unwrap(), snapshot);
    }

    #[test]
    fn file_format() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save(&Snapshot::from(vec![counters(100, 0), counters(50, 0)]))
            .unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "100 0\n50 0\n");
    }

    #[test]
    fn save_truncates() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save(&Snapshot::from(vec![counters(1, 1), counters(2, 2)]))
            .unwrap();
        store.save(&Snapshot::from(vec![counters(3, 3)])).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "3 3\n");
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).load(2).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn short_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "10 20\n").unwrap();
        assert_eq!(store.load(4).unwrap(), Snapshot::from(vec![counters(10, 20)]));
    }

    #[test]
    fn long_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "1 2\n3 4\n5 6\n").unwrap();
        assert_eq!(store.load(2).unwrap().len(), 2);
    }

    #[test]
    fn malformed() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        for content in ["1 2\nthree 4\n", "1 2\n3\n", "1 2\n3 4 5\n", "\n"] {
            fs::write(store.path(), content).unwrap();
            let err = store.load(2).unwrap_err();
            assert!(matches!(err, LoadError::Malformed { .. }), "{content:?}");
        }
    }

    #[test]
    fn unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let store = SnapshotStore::new(&missing, SnapshotKey::from(1)).unwrap();
        let err = store.save(&Snapshot::from(vec![counters(1, 1)])).unwrap_err();
        assert!(matches!(err, SaveError::Open { .. }));
    }
}
