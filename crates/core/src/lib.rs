//! Domain types shared across the Haven workspace.
//!
//! Holds the [`Listing`](listing::Listing) entity and its enumerations, the
//! input DTO with its validation rules, the pure listing filter used by the
//! browsing client, and the error taxonomy the other crates map from.

pub mod error;
pub mod filter;
pub mod listing;
pub mod types;
