use std::thread;
use std::time::Duration;

use urano_core::{HostClock, Runtime};
use urano_foundation::PointerEvent;
use urano_ui_graphics::Point;

const FRAME: Duration = Duration::from_millis(16);
const SETTLE_LIMIT_MILLIS: u64 = 5_000;

/// A minimal event loop: one runtime, pumped from the wall clock.
pub struct Host {
    runtime: Runtime,
    clock: HostClock,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            clock: HostClock::new(),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.elapsed_millis()
    }

    pub fn frame(&self) {
        thread::sleep(FRAME);
        self.clock.pump(&self.runtime);
    }

    /// Pumps frames until no animation is waiting for one.
    pub fn settle(&self) -> anyhow::Result<()> {
        let start = self.now_millis();
        while self.runtime.needs_frame() {
            self.frame();
            anyhow::ensure!(
                self.now_millis() - start < SETTLE_LIMIT_MILLIS,
                "animation did not settle within {SETTLE_LIMIT_MILLIS}ms"
            );
        }
        Ok(())
    }

    /// Pumps frames for at least `millis` of wall time.
    pub fn wait(&self, millis: u64) {
        let until = self.now_millis() + millis;
        while self.now_millis() < until {
            self.frame();
        }
    }

    pub fn down(&self, x: f32, y: f32) -> PointerEvent {
        PointerEvent::down(Point::new(x, y), self.now_millis())
    }

    pub fn moved(&self, x: f32, y: f32) -> PointerEvent {
        PointerEvent::moved(Point::new(x, y), self.now_millis())
    }

    pub fn up(&self, x: f32, y: f32) -> PointerEvent {
        PointerEvent::up(Point::new(x, y), self.now_millis())
    }
}
