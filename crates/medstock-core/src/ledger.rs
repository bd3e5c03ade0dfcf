//! # Ledger View Helpers
//!
//! Pure calculations behind the daily purchase ledger: the calendar-day
//! window, the per-day aggregate, and the low-stock highlighting rules.
//!
//! ## Timezone Convention
//! The store trades in IST, so a "day" is the fixed-offset UTC+5:30 window
//! `[D 00:00:00.000 IST, D 23:59:59.999 IST]`. Timestamps are stored in UTC;
//! the window converts to UTC for range queries. One convention, applied
//! everywhere — including the resolution of "today".

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::money::Money;
use crate::types::Purchase;

/// Offset of the store's wall clock from UTC, in minutes (IST = UTC+5:30).
pub const STORE_UTC_OFFSET_MINUTES: i64 = 330;

// =============================================================================
// Day Windows
// =============================================================================

/// UTC bounds of the store-local calendar day `date`, both ends inclusive.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use medstock_core::ledger::day_window;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let (start, end) = day_window(date);
/// // 2025-03-10 IST begins at 2025-03-09T18:30:00Z
/// assert_eq!(start.to_rfc3339(), "2025-03-09T18:30:00+00:00");
/// assert_eq!(end.to_rfc3339(), "2025-03-10T18:29:59.999+00:00");
/// ```
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_midnight = date.and_time(NaiveTime::MIN);
    let start = Utc.from_utc_datetime(&local_midnight)
        - Duration::minutes(STORE_UTC_OFFSET_MINUTES);
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

/// The store-local calendar date of a UTC instant.
///
/// Used to resolve "today" when the ledger is queried without a date.
pub fn store_date_of(instant: DateTime<Utc>) -> NaiveDate {
    (instant + Duration::minutes(STORE_UTC_OFFSET_MINUTES)).date_naive()
}

// =============================================================================
// Daily Aggregate
// =============================================================================

/// Per-day rollup over a filtered set of purchases.
/// Display-derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub purchase_count: usize,
    /// Σ subtotal across the set.
    pub gross: Money,
    /// Σ discount across the set.
    pub discount: Money,
    /// gross − discount.
    pub net: Money,
}

/// Computes the aggregate the home page shows for one day's purchases.
pub fn daily_summary(purchases: &[Purchase]) -> DailySummary {
    let gross: Money = purchases.iter().map(Purchase::total).sum();
    let discount: Money = purchases.iter().map(Purchase::discount).sum();

    DailySummary {
        purchase_count: purchases.len(),
        gross,
        discount,
        net: gross - discount,
    }
}

// =============================================================================
// Low-Stock Flags
// =============================================================================

/// Re-order threshold for a category, if the category has one.
/// Matching is case-insensitive; unknown categories have no threshold.
pub fn low_stock_threshold(category: &str) -> Option<i64> {
    match category.trim().to_lowercase().as_str() {
        "tablet" => Some(10),
        "capsule" => Some(10),
        "syrup" => Some(5),
        "injection" => Some(5),
        "ointment" => Some(3),
        _ => None,
    }
}

/// Whether a medicine should be highlighted as low on stock.
///
/// Highlighting only — a low-stock medicine can still be sold down to zero.
pub fn is_low_stock(category: &str, quantity: i64) -> bool {
    match low_stock_threshold(category) {
        Some(threshold) => quantity < threshold,
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
