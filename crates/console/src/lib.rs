//! `haven-console` -- terminal client for the listing catalog.
//!
//! Provides the public browsing view (fetch-then-filter, all filtering
//! client-side) and the administrative console (create, edit, delete with
//! confirmation, session login/logout, dashboard).

pub mod cli;
pub mod client;
pub mod commands;
pub mod output;
