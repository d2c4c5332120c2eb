use crate::stat::{Counters, Snapshot};

/// how busy a cpu core was between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Usage {
    /// there is no earlier sample to compare against.
    Unknown,
    /// the fraction of time spent active.
    ///
    /// this is within `0.0..=1.0` unless a counter went backwards.
    Fraction(f64),
}

// === impl Usage ===

impl Usage {
    /// compares the counters of each core in `current` against `previous`.
    ///
    /// cores missing from `previous`, or every core if there is no previous snapshot, are
    /// [`Usage::Unknown`].
    pub fn compute(previous: Option<&Snapshot>, current: &Snapshot) -> Vec<Usage> {
        current
            .iter()
            .enumerate()
            .map(|(core, now)| {
                previous
                    .and_then(|previous| previous.get(core))
                    .map_or(Self::Unknown, |then| Self::between(then, now))
            })
            .collect()
    }

    fn between(then: &Counters, now: &Counters) -> Self {
        let active = now.active.since(then.active);
        let inactive = now.inactive.since(then.inactive);

        let total = active + inactive;
        if total == 0 {
            return Self::Fraction(0.0);
        }

        Self::Fraction(active as f64 / total as f64)
    }
}
