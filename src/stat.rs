use {
    crate::source::StatsSource,
    std::{
        io::{self, BufRead, BufReader},
        num::ParseIntError,
        path::PathBuf,
        str::FromStr,
    },
    tracing::{debug, trace},
};

pub use self::{
    cpu_time::{Counters, CpuTime},
    user_hz::UserHz,
};

mod cpu_time;
mod user_hz;


/// the counters of every cpu core, indexed by core number.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    cpus: Vec<Counters>,
}

/// an entry in the `/proc/stat` kernel statistics table.
///
/// see `proc_stat(5)` for more information. only cpu lines are of interest here, every other
/// kind of line fails to parse and is skipped by [`Snapshot::read()`].
#[derive(Debug, Eq, PartialEq)]
pub enum Entry {
    /// the amount of time that the system ("cpu" line) spent in various states.
    AllCpu { time: CpuTime },
    /// the amount of time that a specific cpu ("cpuN" line) spent in various states.
    Cpu { id: CpuId, time: CpuTime },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CpuId(usize);

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum EntryParseError {
    #[error("empty line")]
    Empty,
    #[error("unrecognized entry kind: {kind}")]
    UnrecognizedEntry { kind: String },
    #[error("invalid cpu id: {0}")]
    CpuIdParse(ParseIntError),
    #[error("invalid time value: {0}")]
    UserHzParse(ParseIntError),
    #[error("expected 10 time values, found {found}")]
    MissingTimes { found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum StatReadError {
    #[error("could not open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("could not read kernel statistics: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected cpu order in kernel statistics: expected cpu{expected}, found cpu{found}")]
    UnexpectedOrder { expected: usize, found: usize },
    #[error("{expected} cpus expected, only information about {found} cpus found")]
    CoreCountMismatch { expected: usize, found: usize },
}

// === impl Snapshot ===

impl Snapshot {
    /// uses the given source to parse a snapshot of the cpu statistics.
    ///
    /// cpu lines must be numbered `0..cores` in the order they appear. reading stops once
    /// `cores` lines have been collected.
    pub fn read(stats: &impl StatsSource, cores: usize) -> Result<Snapshot, StatReadError> {
        let reader = stats.open().map_err(|source| StatReadError::Open {
            path: stats.name().to_owned(),
            source,
        })?;

        let mut cpus = Vec::with_capacity(cores);
        for line in BufReader::new(reader).split(b'\n') {
            let line = line?;
            let Ok(line) = std::str::from_utf8(&line) else {
                trace!(line = %line.escape_ascii(), "skipping line that is not utf-8");
                continue;
            };
            let (CpuId(id), time) = match line.parse::<Entry>() {
                Ok(Entry::Cpu { id, time }) => (id, time),
                Ok(Entry::AllCpu { .. }) => continue,
                Err(error) => {
                    trace!(%line, %error, "skipping line");
                    continue;
                }
            };

            let expected = cpus.len();
            if id != expected {
                return Err(StatReadError::UnexpectedOrder {
                    expected,
                    found: id,
                });
            }

            cpus.push(Counters::from(&time));
            if cpus.len() >= cores {
                break;
            }
        }

        if cpus.len() != cores {
            return Err(StatReadError::CoreCountMismatch {
                expected: cores,
                found: cpus.len(),
            });
        }

        debug!(cores, "read current cpu statistics");
        Ok(Snapshot { cpus })
    }

    /// returns the counters of the given core, if this snapshot has any.
    pub fn get(&self, core: usize) -> Option<&Counters> {
        self.cpus.get(core)
    }

    pub fn len(&self) -> usize {
        self.cpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Counters> {
        self.cpus.iter()
    }
}

impl From<Vec<Counters>> for Snapshot {
    fn from(cpus: Vec<Counters>) -> Self {
        Self { cpus }
    }
}

// === impl Entry ===

impl FromStr for Entry {
    type Err = EntryParseError;
    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let mut tokens = entry.split_whitespace();
        let kind = tokens.next().ok_or(EntryParseError::Empty)?;
        let id = Self::parse_cpu_id(kind)?;

        // anything past the tenth value is ignored.
        let times = tokens
            .take(10)
            .map(str::parse::<UserHz>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(EntryParseError::UserHzParse)?;
        let time = <[UserHz; 10]>::try_from(times)
            .map(CpuTime::from)
            .map_err(|times| EntryParseError::MissingTimes { found: times.len() })?;

        Ok(if let Some(id) = id {
            Self::Cpu { id, time }
        } else {
            Self::AllCpu { time }
        })
    }
}

impl Entry {
    fn parse_cpu_id(token: &str) -> Result<Option<CpuId>, EntryParseError> {
        use EntryParseError::{CpuIdParse, UnrecognizedEntry};

        // strip the token of its "cpu" prefix.
        let suffix = token.strip_prefix("cpu").ok_or_else(|| UnrecognizedEntry {
            kind: token.to_owned(),
        })?;

        // if there is no suffix, return `None`.
        if suffix.is_empty() {
            return Ok(None);
        }

        // parse the id into an integer.
        suffix
            .parse::<usize>()
            .map(CpuId)
            .map(Some)
            .map_err(CpuIdParse)
    }
}
