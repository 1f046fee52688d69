use web_time::Instant;

use crate::runtime::Runtime;

/// Maps wall-clock time onto a [`Runtime`] timeline.
///
/// The runtime itself only knows virtual time; a host event loop owns one
/// `HostClock` and calls [`HostClock::pump`] whenever it wakes up.
pub struct HostClock {
    origin: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_nanos() / crate::NANOS_PER_MILLI
    }

    /// Fires due timers and runs one frame at the current wall-clock time.
    pub fn pump(&self, runtime: &Runtime) -> u64 {
        let now = self.elapsed_nanos();
        runtime.run_frame(now);
        now
    }
}
