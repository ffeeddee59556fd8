//! Shift resolver
//!
//! Business dates and shift windows are wall-clock values in one fixed civil
//! zone. Everything here converts the instant into that zone first, so the
//! server's own zone never matters.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use shared::models::Shift;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Frozen clock for tests
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar date of `instant` in `tz`
pub fn civil_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Hour (0..=23) of `instant` in `tz`
pub fn civil_hour(instant: DateTime<Utc>, tz: Tz) -> u32 {
    instant.with_timezone(&tz).hour()
}

/// Shift active at a civil hour: [8,16) morning, [16,23) evening, else closed
pub fn active_shift(hour: u32) -> Shift {
    Shift::for_hour(hour)
}

/// Business date and shift at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub fecha: NaiveDate,
    pub hora: u32,
    pub turno: Shift,
}

/// Resolves "today" and the current shift from an injected clock
#[derive(Clone)]
pub struct ShiftResolver {
    tz: Tz,
    clock: Arc<dyn Clock>,
}

impl ShiftResolver {
    pub fn new(tz: Tz, clock: Arc<dyn Clock>) -> Self {
        Self { tz, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today's civil date
    pub fn today(&self) -> NaiveDate {
        civil_date(self.now(), self.tz)
    }

    /// Date, hour and shift at the current instant
    pub fn current(&self) -> ShiftWindow {
        self.window_at(self.now())
    }

    pub fn window_at(&self, instant: DateTime<Utc>) -> ShiftWindow {
        let hora = civil_hour(instant, self.tz);
        ShiftWindow {
            fecha: civil_date(instant, self.tz),
            hora,
            turno: active_shift(hora),
        }
    }
}

impl std::fmt::Debug for ShiftResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftResolver").field("tz", &self.tz).finish()
    }
}
