//! Shift Model (turnos)

use serde::{Deserialize, Serialize};

/// Operating shift of a business day
///
/// Serialized as its number: `0` closed, `1` morning, `2` evening.
/// `Closed` is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum Shift {
    Closed,
    Morning,
    Evening,
}

impl Shift {
    /// Opening hour of the morning shift (inclusive)
    pub const MORNING_START: u32 = 8;
    /// Opening hour of the evening shift (inclusive), closing of the morning one
    pub const EVENING_START: u32 = 16;
    /// Closing hour of the evening shift (exclusive)
    pub const EVENING_END: u32 = 23;

    pub const fn number(&self) -> i16 {
        match self {
            Shift::Closed => 0,
            Shift::Morning => 1,
            Shift::Evening => 2,
        }
    }

    pub const fn from_number(value: i16) -> Option<Self> {
        match value {
            0 => Some(Shift::Closed),
            1 => Some(Shift::Morning),
            2 => Some(Shift::Evening),
            _ => None,
        }
    }

    /// Shift active at a civil hour (0..=23)
    pub const fn for_hour(hour: u32) -> Self {
        if hour >= Self::MORNING_START && hour < Self::EVENING_START {
            Shift::Morning
        } else if hour >= Self::EVENING_START && hour < Self::EVENING_END {
            Shift::Evening
        } else {
            Shift::Closed
        }
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self, Shift::Closed)
    }
}

impl From<Shift> for i16 {
    fn from(shift: Shift) -> Self {
        shift.number()
    }
}

impl TryFrom<i16> for Shift {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Shift::from_number(value).ok_or_else(|| format!("invalid shift: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_hour_boundaries() {
        assert_eq!(Shift::for_hour(0), Shift::Closed);
        assert_eq!(Shift::for_hour(7), Shift::Closed);
        assert_eq!(Shift::for_hour(8), Shift::Morning);
        assert_eq!(Shift::for_hour(15), Shift::Morning);
        assert_eq!(Shift::for_hour(16), Shift::Evening);
        assert_eq!(Shift::for_hour(22), Shift::Evening);
        assert_eq!(Shift::for_hour(23), Shift::Closed);
    }

    #[test]
    fn test_every_hour_matches_windows() {
        for h in 0..24u32 {
            let expected = if (8..16).contains(&h) {
                1
            } else if (16..23).contains(&h) {
                2
            } else {
                0
            };
            assert_eq!(Shift::for_hour(h).number(), expected, "hour {h}");
        }
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&Shift::Evening).unwrap(), "2");
        let shift: Shift = serde_json::from_str("1").unwrap();
        assert_eq!(shift, Shift::Morning);
        assert!(serde_json::from_str::<Shift>("3").is_err());
    }
}
