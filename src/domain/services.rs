//! External services for the campaign aggregate.
//!
//! Services provide external dependencies (like time) to the aggregate
//! without coupling it to specific implementations.

use crate::domain::types::TimestampUtc;

/// Services injected into the campaign aggregate for command handling.
#[derive(Debug, Clone, Default)]
pub struct CampaignServices {
    pub clock: CampaignClock,
}

/// Clock service for timestamp generation.
#[derive(Debug, Clone, Default)]
pub struct CampaignClock;

impl CampaignClock {
    /// Returns the current UTC timestamp.
    pub fn now(&self) -> TimestampUtc {
        TimestampUtc::now()
    }
}
