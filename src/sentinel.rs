use {
    crate::{
        Error,
        source::{Host, ProcStatFile, StatsSource, SystemHost},
        stat::Snapshot,
        store::{SnapshotKey, SnapshotStore},
        usage::Usage,
    },
    std::path::PathBuf,
    tracing::debug,
};

/// observes kernel statistics across invocations.
pub struct Sentinel<H = SystemHost, S = ProcStatFile> {
    /// the machine being observed.
    host: H,
    /// the underlying source of kernel statistics.
    source: S,
    /// where previous snapshots are kept.
    tmp_dir: PathBuf,
}

/// a comparison of the current snapshot to the one taken by the previous run.
#[derive(Clone, Debug)]
pub struct Recording {
    /// the previous snapshot, if one could be loaded.
    pub previous: Option<Snapshot>,
    /// the snapshot taken by this run.
    pub current: Snapshot,
}

/// === impl Sentinel ===

impl<H, S> Sentinel<H, S> {
    /// creates a new [`Sentinel`].
    pub fn new(host: H, source: S, tmp_dir: impl Into<PathBuf>) -> Self {
        Self {
            host,
            source,
            tmp_dir: tmp_dir.into(),
        }
    }
}

impl<H, S> Sentinel<H, S>
where
    H: Host,
    S: StatsSource,
{
    /// returns a [`Recording`] of cpu time since this tool was last run by the same parent.
    ///
    /// the current snapshot replaces the stored one before returning. a missing or unreadable
    /// previous snapshot is not an error.
    pub fn observe(&self) -> Result<Recording, Error> {
        let Self {
            host,
            source,
            tmp_dir,
        } = self;

        let cores = host.cores();
        let store = SnapshotStore::new(tmp_dir, SnapshotKey::parent(host))?;

        let previous = store
            .load(cores)
            .inspect_err(|error| debug!(%error, "no previous snapshot"))
            .ok();
        let current = Snapshot::read(source, cores)?;
        store.save(&current)?;

        Ok(Recording { previous, current })
    }
}

// === impl Recording ===

impl Recording {
    /// the usage of each core between the two snapshots.
    pub fn usage(&self) -> Vec<Usage> {
        let Self { previous, current } = self;
        Usage::compute(previous.as_ref(), current)
    }
}
