//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `haven_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod admin;
pub mod listings;
