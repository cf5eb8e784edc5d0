use std::time::Duration;

/// Waits between the opponent's steps.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Records requested waits without sleeping.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    elapsed: Duration,
    waits: Vec<Duration>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl Clock for VirtualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.waits.push(duration);
    }
}
