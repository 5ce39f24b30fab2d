use chrono::{DateTime, Utc};

/// Draw 1: 2002-12-07 20:45 KST (11:45 UTC), Unix seconds.
pub const FIRST_DRAW_TS: i64 = 1_039_261_500;
const WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Index of the most recent draw held at `now`, 0 before the first draw.
/// One draw per week, every Saturday evening.
pub fn latest_draw(now: DateTime<Utc>) -> u32 {
    let elapsed = now.timestamp() - FIRST_DRAW_TS;
    if elapsed < 0 {
        return 0;
    }
    u32::try_from(elapsed / WEEK_SECS + 1).unwrap_or(u32::MAX)
}
