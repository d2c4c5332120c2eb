use super::*;

/// how a single cpu has spent its time since boot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CpuTime {
    /// time spent in user mode.
    pub user: UserHz,
    /// time spent in user mode with low priority (nice).
    pub nice: UserHz,
    /// time spent in system mode.
    pub system: UserHz,
    /// time spent in the idle task.
    pub idle: UserHz,
    /// time waiting for i/o to complete.
    ///
    /// this value is not reliable, and may decrease in certain conditions.
    pub iowait: UserHz,
    /// time servicing interrupts.
    pub irq: UserHz,
    /// time servicing softirqs.
    pub softirq: UserHz,
    /// stolen time, which is the time spent in other operating systems when running in a
    /// virtualized environment.
    pub steal: UserHz,
    /// time spent running a virtual cpu for guest operating systems.
    pub guest: UserHz,
    /// time spent running a niced guest.
    pub guest_nice: UserHz,
}

/// the busy and idle tick totals of a cpu.
///
/// these are the only values persisted between runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counters {
    pub active: UserHz,
    pub inactive: UserHz,
}

// === impl CpuTime ===

impl CpuTime {
    /// ticks spent doing work.
    pub fn active(&self) -> UserHz {
        let Self {
            user,
            nice,
            system,
            irq,
            softirq,
            steal,
            idle: _,
            iowait: _,
            // guest time is already accounted for in `user` and `nice`.
            guest: _,
            guest_nice: _,
        } = *self;

        user + nice + system + irq + softirq + steal
    }

    /// ticks spent idle or waiting on i/o.
    pub fn inactive(&self) -> UserHz {
        let Self { idle, iowait, .. } = *self;
        idle + iowait
    }
}

impl From<&CpuTime> for Counters {
    fn from(time: &CpuTime) -> Self {
        Self {
            active: time.active(),
            inactive: time.inactive(),
        }
    }
}

impl From<[UserHz; 10]> for CpuTime {
    fn from(
        [
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        ]: [UserHz; 10],
    ) -> Self {
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        }
    }
}
