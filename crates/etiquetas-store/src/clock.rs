//! Buenos Aires wall clock.
//!
//! Argentina has stayed on UTC−03:00 without daylight saving since 2009, so
//! a fixed offset is enough.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Seconds west of UTC for Buenos Aires.
pub const BUENOS_AIRES_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// The UTC−03:00 offset.
pub fn buenos_aires_offset() -> FixedOffset {
    FixedOffset::west_opt(BUENOS_AIRES_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time in Buenos Aires.
pub fn buenos_aires_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&buenos_aires_offset())
}
