//! a one-line unicode bargraph of per-core cpu load.
//!
//! each run samples the kernel's per-core counters, compares them to the sample left behind by
//! the previous run from the same parent process, and draws one block per core. the first run
//! has nothing to compare against, and draws `E` for every core.

use {
    self::{
        meter::Meter,
        stat::StatReadError,
        store::{PathError, SaveError},
    },
    std::io::{self, Write},
};

pub use self::{
    config::Config,
    sentinel::{Recording, Sentinel},
    source::{Host, MockHost, MockStatFile, ProcStatFile, StatsSource, SystemHost},
    usage::Usage,
};

pub mod config;
pub mod meter;
pub mod sentinel;
pub mod source;
/// kernel statistics facilities.
///
/// this file provides tools to interact with `/proc/stat`.
pub mod stat;
pub mod store;
pub mod usage;

pub struct App<H = SystemHost, S = ProcStatFile> {
    sentinel: Sentinel<H, S>,
}

/// a failure that ends the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("generating snapshot file name failed: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    Stat(#[from] StatReadError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("could not write output: {0}")]
    Output(#[source] io::Error),
}

/// === impl App ===

impl App {
    /// initializes a new application, observing this host.
    pub fn new(config: Config) -> Self {
        let Config { stat_path, tmp_dir } = config;
        let sentinel = Sentinel::new(SystemHost, ProcStatFile::new(stat_path), tmp_dir);
        Self { sentinel }
    }
}

impl<H, S> App<H, S>
where
    H: Host,
    S: StatsSource,
{
    pub fn with_sentinel(sentinel: Sentinel<H, S>) -> Self {
        Self { sentinel }
    }

    /// runs the application once, drawing the meter to `writer`.
    ///
    /// nothing is written if the run fails.
    pub fn run(&self, writer: &mut impl Write) -> Result<(), Error> {
        let Self { sentinel } = self;

        let usage = sentinel.observe()?.usage();
        Meter { usage: &usage }.draw(writer).map_err(Error::Output)
    }
}
