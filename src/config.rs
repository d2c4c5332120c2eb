//! build-time configuration.
//!
//! the tool takes no arguments and reads no configuration at runtime. paths and the log level
//! can be overridden when compiling, by setting `CPUBGLINE_STATPATH`, `CPUBGLINE_TMPPATH`, or
//! `CPUBGLINE_LOG` in the build environment.

use {std::path::PathBuf, tracing::Level};

/// where the kernel's statistics table lives.
const STAT_PATH: &str = match option_env!("CPUBGLINE_STATPATH") {
    Some(path) => path,
    None => "/proc/stat",
};

/// the directory snapshots are stored in.
const TMP_PATH: &str = match option_env!("CPUBGLINE_TMPPATH") {
    Some(path) => path,
    None => "/tmp",
};

const LOG_LEVEL: &str = match option_env!("CPUBGLINE_LOG") {
    Some(level) => level,
    None => "warn",
};

#[derive(Clone, Debug)]
pub struct Config {
    /// the `/proc/stat`-formatted file to sample.
    pub stat_path: PathBuf,
    /// the directory the previous sample is kept in.
    pub tmp_dir: PathBuf,
}

// === impl Config ===

impl Default for Config {
    fn default() -> Self {
        Self {
            stat_path: PathBuf::from(STAT_PATH),
            tmp_dir: PathBuf::from(TMP_PATH),
        }
    }
}

impl Config {
    /// the most verbose level diagnostics are emitted at.
    ///
    /// an unrecognized level falls back to `WARN`.
    pub fn log_level() -> Level {
        LOG_LEVEL.parse().unwrap_or(Level::WARN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let Config { stat_path, tmp_dir } = Config::default();
        assert_eq!(stat_path, PathBuf::from(STAT_PATH));
        assert_eq!(tmp_dir, PathBuf::from(TMP_PATH));
    }
}
