//! Agent uptime in TimeTicks.
//!
//! The surrounding agent records one baseline timestamp at startup with
//! [`init_baseline`]; every sender measures sysUpTime against it.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static BASELINE: OnceLock<Uptime> = OnceLock::new();

/// A wall-clock instant in hundredths of a second since the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uptime {
    centis: u64,
}

impl Uptime {
    /// Convert a clock reading. Instants before the epoch clamp to zero.
    pub fn from_system_time(time: SystemTime) -> Self {
        let centis = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() * 100 + u64::from(d.subsec_micros() / 10_000))
            .unwrap_or(0);
        Self { centis }
    }

    /// Hundredths of a second since the UNIX epoch.
    pub fn centis(self) -> u64 {
        self.centis
    }

    /// TimeTicks elapsed from `self` to `now`.
    ///
    /// Saturates at zero when `now` is earlier, and wraps modulo 2^32 like
    /// the TimeTicks type does.
    pub fn ticks_at(self, now: SystemTime) -> u32 {
        self.ticks_since(Uptime::from_system_time(now))
    }

    /// TimeTicks elapsed from `self` to `later`.
    pub fn ticks_since(self, later: Uptime) -> u32 {
        later.centis.saturating_sub(self.centis) as u32
    }
}

/// Record the process-wide baseline.
///
/// Only the first call takes effect; returns whether this call set it.
pub fn init_baseline(time: SystemTime) -> bool {
    let set = BASELINE.set(Uptime::from_system_time(time)).is_ok();
    if set {
        tracing::debug!(
            target: "snmp_trap_sender::uptime",
            { snmp.baseline = BASELINE.get().map(|b| b.centis()) },
            "uptime baseline initialized"
        );
    }
    set
}

/// The process-wide baseline.
///
/// If the agent never called [`init_baseline`], the first reader sets it to
/// the current time, so uptime starts counting from there.
pub fn baseline() -> Uptime {
    *BASELINE.get_or_init(|| {
        tracing::debug!(
            target: "snmp_trap_sender::uptime",
            "uptime baseline was not initialized, starting from now"
        );
        Uptime::from_system_time(SystemTime::now())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_five_seconds_is_500_ticks() {
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let base = Uptime::from_system_time(t);
        assert_eq!(base.ticks_at(t + Duration::from_secs(5)), 500);
    }

    #[test]
    fn test_sub_centisecond_truncates() {
        let t = UNIX_EPOCH + Duration::from_millis(1_234);
        assert_eq!(Uptime::from_system_time(t).centis(), 123);
    }

    #[test]
    fn test_clock_behind_baseline_saturates() {
        let t = UNIX_EPOCH + Duration::from_secs(100);
        let base = Uptime::from_system_time(t);
        assert_eq!(base.ticks_at(t - Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_ticks_wrap() {
        let base = Uptime::from_system_time(UNIX_EPOCH);
        let later = Uptime {
            centis: (1u64 << 32) + 7,
        };
        assert_eq!(base.ticks_since(later), 7);
    }

    #[test]
    fn test_pre_epoch_clamps() {
        let t = UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(Uptime::from_system_time(t).centis(), 0);
    }

    #[test]
    fn test_baseline_is_stable() {
        let first = baseline();
        assert!(!init_baseline(SystemTime::now() + Duration::from_secs(60)));
        assert_eq!(baseline(), first);
    }
}
