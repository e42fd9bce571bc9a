use serde::{Deserialize, Serialize};

/// Orders with at most this many minutes before the pickup window closes
/// are critical.
pub const CRITICAL_THRESHOLD_MINUTES: i64 = 120;

/// Upper bound of the high-urgency band, inclusive.
pub const HIGH_THRESHOLD_MINUTES: i64 = 300;

/// Discrete priority of an order, derived from its remaining time. Never
/// stored; recomputed against the clock whenever the order list renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Critical,
    High,
    Normal,
}

impl UrgencyTier {
    /// Pure classification: the caller derives `minutes_remaining` from
    /// `pickup_window.end - now`, this function never reads the clock.
    pub fn from_minutes_remaining(minutes_remaining: i64) -> Self {
        if minutes_remaining <= CRITICAL_THRESHOLD_MINUTES {
            UrgencyTier::Critical
        } else if minutes_remaining <= HIGH_THRESHOLD_MINUTES {
            UrgencyTier::High
        } else {
            UrgencyTier::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(
            UrgencyTier::from_minutes_remaining(120),
            UrgencyTier::Critical
        );
        assert_eq!(UrgencyTier::from_minutes_remaining(121), UrgencyTier::High);
        assert_eq!(UrgencyTier::from_minutes_remaining(300), UrgencyTier::High);
        assert_eq!(
            UrgencyTier::from_minutes_remaining(301),
            UrgencyTier::Normal
        );
    }

    #[test]
    fn test_expired_windows_are_critical() {
        assert_eq!(UrgencyTier::from_minutes_remaining(0), UrgencyTier::Critical);
        assert_eq!(
            UrgencyTier::from_minutes_remaining(-45),
            UrgencyTier::Critical
        );
    }
}
