use std::{fmt, ops::Add, str::FromStr};

/// a counter of clock ticks, as reported by `/proc/stat`.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct UserHz(u64);

// === impl UserHz ===

impl UserHz {
    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    /// returns the signed number of ticks elapsed since `earlier`.
    ///
    /// counters that wrapped or were reset produce a negative delta.
    pub fn since(self, earlier: Self) -> i128 {
        let (Self(now), Self(then)) = (self, earlier);
        i128::from(now) - i128::from(then)
    }
}

impl FromStr for UserHz {
    type Err = <u64 as FromStr>::Err;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Add for UserHz {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        let (Self(lhs), Self(rhs)) = (self, rhs);
        Self(lhs.wrapping_add(rhs))
    }
}

impl fmt::Display for UserHz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(ticks) = self;
        write!(f, "{ticks}")
    }
}
