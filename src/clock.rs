use std::time::Instant;

/// A monotonic time source.
pub trait Clock {
    /// Gets the current time, in nanoseconds since an arbitrary but fixed origin.
    fn nanos(&self) -> i64;
}

/// A [`Clock`] backed by [`Instant`], counting from its construction.
#[derive(Debug, Copy, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Initializes a new [`SystemClock`] starting at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn nanos(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.nanos();
        let second = clock.nanos();
        assert!(first >= 0);
        assert!(second >= first);
    }
}
