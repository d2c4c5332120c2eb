use std::{
    cell::RefCell,
    collections::VecDeque,
    fs::File,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
};

pub use self::{host::*, stats::*};

/// facts about the machine and the process this is running in.
mod host {
    /// a provider of host information.
    pub trait Host {
        /// the number of processors configured on this host.
        ///
        /// this counts configured cores, not merely those that are online.
        fn cores(&self) -> usize;

        /// the id of the process that invoked this one.
        fn parent_pid(&self) -> u32;
    }

    /// the host this process is running on.
    #[derive(Default)]
    pub struct SystemHost;

    /// a mock host.
    #[derive(Clone, Debug)]
    pub struct MockHost {
        pub cores: usize,
        pub parent_pid: u32,
    }

    impl Host for SystemHost {
        fn cores(&self) -> usize {
            // SAFETY: `sysconf` has no side effects and is safe to call from any thread.
            let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_CONF) };
            match usize::try_from(n) {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(%n, "sysconf did not report a processor count, assuming one");
                    1
                }
            }
        }

        fn parent_pid(&self) -> u32 {
            std::os::unix::process::parent_id()
        }
    }

    impl Host for MockHost {
        fn cores(&self) -> usize {
            self.cores
        }

        fn parent_pid(&self) -> u32 {
            self.parent_pid
        }
    }
}

/// abstracts over providers of statistics.
mod stats {
    use super::*;

    /// a source of kernel statistics.
    pub trait StatsSource {
        /// returns a reader.
        fn open(&self) -> io::Result<impl Read>;

        /// a human-readable name for this source, used in diagnostics.
        fn name(&self) -> &Path;
    }

    /// stats backed by a `/proc/stat`-formatted file.
    pub struct ProcStatFile {
        path: PathBuf,
    }

    /// a mock stat source.
    ///
    /// each call to [`StatsSource::open()`] yields the next queued table. once the queue is
    /// drained, opening fails as though the file did not exist.
    #[derive(Default)]
    pub struct MockStatFile {
        stats: RefCell<VecDeque<Vec<u8>>>,
    }

    // === impl ProcStatFile ===

    impl ProcStatFile {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    impl StatsSource for ProcStatFile {
        fn open(&self) -> io::Result<impl Read> {
            File::open(&self.path)
        }

        fn name(&self) -> &Path {
            &self.path
        }
    }

    // === impl MockStatFile ===

    impl MockStatFile {
        /// queues a table to be returned by a later call to `open`.
        pub fn push(&self, stats: impl Into<Vec<u8>>) {
            self.stats.borrow_mut().push_back(stats.into());
        }
    }

    impl From<&str> for MockStatFile {
        fn from(stats: &str) -> Self {
            let mock = Self::default();
            mock.push(stats);
            mock
        }
    }

    impl StatsSource for MockStatFile {
        fn open(&self) -> io::Result<impl Read> {
            let Self { stats } = self;

            stats
                .borrow_mut()
                .pop_front()
                .map(Cursor::new)
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn name(&self) -> &Path {
            Path::new("<mock>")
        }
    }
}
