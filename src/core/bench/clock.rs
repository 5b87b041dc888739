use std::time::Instant;

/// Monotonic nanosecond time source.
pub trait Clock {
    fn now_ns(&self) -> u128;
}

/// Default clock backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u128 {
        self.origin.elapsed().as_nanos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::default();
        let first = clock.now_ns();
        let second = clock.now_ns();
        assert!(second >= first);
    }
}
