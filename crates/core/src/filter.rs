//! Client-side listing filter.
//!
//! The browsing view filters the full fetched collection locally. The filter
//! is an immutable criteria value applied through a pure function: same
//! inputs, same output, input order preserved. An unset criterion passes its
//! dimension entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::{Category, Listing, TransactionKind};

/// A price band: closed below, open above (`[floor, ceiling)`), or unbounded
/// above when `ceiling` is `None`.
///
/// Parses from `"min-max"` and `"min+"` notation, e.g. `"0-500000"`,
/// `"500000-1000000"`, `"1000000+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub floor: i64,
    pub ceiling: Option<i64>,
}

impl PriceBand {
    pub fn new(floor: i64, ceiling: Option<i64>) -> Self {
        Self { floor, ceiling }
    }

    /// Whether `price` falls inside the band.
    pub fn contains(&self, price: i64) -> bool {
        price >= self.floor && self.ceiling.is_none_or(|ceiling| price < ceiling)
    }
}

impl FromStr for PriceBand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_bound = |raw: &str| {
            raw.parse::<i64>().map_err(|_| {
                CoreError::Validation(format!("invalid price band `{s}` (expected `min-max` or `min+`)"))
            })
        };

        if let Some(floor) = s.strip_suffix('+') {
            return Ok(PriceBand::new(parse_bound(floor)?, None));
        }
        match s.split_once('-') {
            Some((floor, ceiling)) => Ok(PriceBand::new(
                parse_bound(floor)?,
                Some(parse_bound(ceiling)?),
            )),
            None => Err(CoreError::Validation(format!(
                "invalid price band `{s}` (expected `min-max` or `min+`)"
            ))),
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ceiling {
            Some(ceiling) => write!(f, "{}-{}", self.floor, ceiling),
            None => write!(f, "{}+", self.floor),
        }
    }
}

/// Filter criteria for the browsing view. Every dimension is optional.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category: Option<Category>,
    pub transaction: Option<TransactionKind>,
    pub price_band: Option<PriceBand>,
    /// Case-insensitive substring match against the listing location.
    pub location: Option<String>,
}

impl ListingFilter {
    /// Whether a single listing satisfies every active criterion.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(category) = self.category {
            if listing.category != category {
                return false;
            }
        }
        if let Some(transaction) = self.transaction {
            if listing.transaction != transaction {
                return false;
            }
        }
        if let Some(band) = self.price_band {
            if !band.contains(listing.price) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !location.is_empty()
                && !listing
                    .location
                    .to_lowercase()
                    .contains(&location.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Select the sub-sequence of listings matching the filter, preserving
    /// input order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}
