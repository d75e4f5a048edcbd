use chrono::{DateTime, Utc};

use crate::time::clock::Clock;

/// A [`Clock`] implementation backed by the system clock.
///
/// # Responsibility
/// - Constructing the system clock is the job of the **composition root**.
/// - Application and domain logic only ever see the [`Clock`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn system_clock_tracks_wall_time() {
        let before = Utc::now();
        let now = SystemClock::new().now();
        let after = Utc::now();

        assert!(before <= now && now <= after);
        assert!(now.year() >= 2024);
    }
}
