//! Shared simulated clock and its scoped override guard.

use std::ops::{Deref, DerefMut};

/// The host's mutable "current simulated time".
pub trait SimulatedClock {
    /// Current simulated Julian Date (UT).
    fn simulated_jd(&self) -> f64;

    fn set_simulated_jd(&mut self, jd: f64);

    /// Current simulated Julian Ephemeris Date. Defaults to the JD.
    fn simulated_jde(&self) -> f64 {
        self.simulated_jd()
    }

    /// Recompute host state that depends on the simulated time.
    fn refresh(&mut self) {}
}

/// Scoped override of a [`SimulatedClock`].
///
/// Saves the current epoch on construction and writes it back on drop,
/// on every exit path. Derefs to the wrapped clock so ephemeris queries
/// can go through the guard.
pub struct ClockOverride<'a, C: SimulatedClock + ?Sized> {
    clock: &'a mut C,
    saved_jd: f64,
    refresh_on_restore: bool,
}

impl<'a, C: SimulatedClock + ?Sized> ClockOverride<'a, C> {
    pub fn new(clock: &'a mut C) -> Self {
        let saved_jd = clock.simulated_jd();
        Self {
            clock,
            saved_jd,
            refresh_on_restore: false,
        }
    }

    /// Also call [`SimulatedClock::refresh`] after restoring.
    pub fn with_refresh(mut self) -> Self {
        self.refresh_on_restore = true;
        self
    }

    /// Epoch that will be restored.
    pub fn saved_jd(&self) -> f64 {
        self.saved_jd
    }

    /// Move the simulated clock to `jd` for the lifetime of the guard.
    pub fn set(&mut self, jd: f64) {
        self.clock.set_simulated_jd(jd);
    }
}

impl<C: SimulatedClock + ?Sized> Deref for ClockOverride<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.clock
    }
}

impl<C: SimulatedClock + ?Sized> DerefMut for ClockOverride<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.clock
    }
}

impl<C: SimulatedClock + ?Sized> Drop for ClockOverride<'_, C> {
    fn drop(&mut self) {
        self.clock.set_simulated_jd(self.saved_jd);
        if self.refresh_on_restore {
            self.clock.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        jd: f64,
        sets: usize,
        refreshes: usize,
    }

    impl SimulatedClock for Counter {
        fn simulated_jd(&self) -> f64 {
            self.jd
        }

        fn set_simulated_jd(&mut self, jd: f64) {
            self.jd = jd;
            self.sets += 1;
        }

        fn refresh(&mut self) {
            self.refreshes += 1;
        }
    }

    #[test]
    fn restores_on_drop() {
        let mut clock = Counter {
            jd: 2_460_000.25,
            ..Default::default()
        };
        {
            let mut guard = ClockOverride::new(&mut clock);
            guard.set(2_460_001.0);
            assert_eq!(guard.simulated_jd(), 2_460_001.0);
            assert_eq!(guard.saved_jd(), 2_460_000.25);
        }
        assert_eq!(clock.jd, 2_460_000.25);
        assert_eq!(clock.refreshes, 0);
    }

    #[test]
    fn restores_on_early_return() {
        fn run(clock: &mut Counter, fail: bool) -> Result<(), &'static str> {
            let mut guard = ClockOverride::new(clock);
            guard.set(1.0);
            if fail {
                return Err("lookup failed");
            }
            guard.set(2.0);
            Ok(())
        }

        let mut clock = Counter {
            jd: 5.5,
            ..Default::default()
        };
        assert!(run(&mut clock, true).is_err());
        assert_eq!(clock.jd, 5.5);
        assert_eq!(clock.sets, 2);
    }

    #[test]
    fn refresh_after_restore() {
        let mut clock = Counter::default();
        {
            let mut guard = ClockOverride::new(&mut clock).with_refresh();
            guard.set(3.0);
        }
        assert_eq!(clock.jd, 0.0);
        assert_eq!(clock.refreshes, 1);
    }

    #[test]
    fn default_jde_follows_jd() {
        let clock = Counter {
            jd: 7.0,
            ..Default::default()
        };
        assert_eq!(clock.simulated_jde(), 7.0);
    }
}
