//! Quantity-tiered delivery estimates.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maps a total unit count to a lead time in days.
///
/// Breakpoints are shared across schedules (10 / 100 / 1000 units); only the
/// per-tier offsets differ between outbound customer deliveries and inbound
/// supplier restocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySchedule {
    offsets: [u64; 4],
}

impl DeliverySchedule {
    /// Outbound deliveries to customers: same day / +1 / +3 / +5.
    pub const CUSTOMER: Self = Self {
        offsets: [0, 1, 3, 5],
    };

    /// Inbound restocks from suppliers: same day / +1 / +4 / +7.
    pub const SUPPLIER: Self = Self {
        offsets: [0, 1, 4, 7],
    };

    pub fn lead_days(&self, units: u64) -> u64 {
        let tier = match units {
            0..=10 => 0,
            11..=100 => 1,
            101..=1000 => 2,
            _ => 3,
        };
        self.offsets[tier]
    }

    /// Estimated arrival: `from` plus the tier offset for `units`.
    pub fn estimate(&self, from: NaiveDate, units: u64) -> NaiveDate {
        from.checked_add_days(Days::new(self.lead_days(units)))
            .unwrap_or(NaiveDate::MAX)
    }
}
