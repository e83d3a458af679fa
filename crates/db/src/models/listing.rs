//! Listing-related query projections.
//!
//! The listing entity itself lives in `haven_core::listing` so the console
//! can share it; this module only holds shapes that exist purely as query
//! output.

use serde::Serialize;
use sqlx::FromRow;

/// Aggregate counters shown on the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingStats {
    pub total_listings: i64,
    pub active_listings: i64,
    pub total_views: i64,
    pub total_inquiries: i64,
}
