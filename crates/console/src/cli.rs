//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use haven_core::filter::PriceBand;
use haven_core::listing::{Category, ListingStatus, TransactionKind};
use haven_core::types::DbId;

#[derive(Debug, Parser)]
#[command(name = "haven-console", about = "Property listing browser and admin console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse listings with client-side filters.
    Browse(BrowseArgs),
    /// Show one listing in detail (counts as a view).
    Show { id: DbId },
    /// Create a new listing.
    Add(AddArgs),
    /// Update an existing listing (full replace of its fields).
    Edit(EditArgs),
    /// Delete a listing and its hosted images.
    Delete {
        id: DbId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Log in to the admin back office.
    Login {
        #[arg(long)]
        username: String,
    },
    /// Log out and discard the local session.
    Logout,
    /// Show the admin dashboard counters.
    Dashboard,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Only this category (`house` or `store`).
    #[arg(long)]
    pub category: Option<Category>,
    /// Only this transaction kind (`buy` or `rent`).
    #[arg(long)]
    pub transaction: Option<TransactionKind>,
    /// Price band, `min-max` or `min+` (e.g. `0-500000`, `1000000+`).
    #[arg(long)]
    pub price: Option<PriceBand>,
    /// Case-insensitive location substring.
    #[arg(long)]
    pub location: Option<String>,
}

/// Scalar listing fields shared by `add` and `edit`.
#[derive(Debug, Args)]
pub struct ListingArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub category: Category,
    #[arg(long)]
    pub transaction: TransactionKind,
    #[arg(long)]
    pub price: i64,
    #[arg(long)]
    pub area: i32,
    #[arg(long, default_value_t = 0)]
    pub bedrooms: i32,
    #[arg(long, default_value_t = 0)]
    pub bathrooms: i32,
    #[arg(long)]
    pub description: String,
    /// Feature tag; repeat for multiple.
    #[arg(long = "feature")]
    pub features: Vec<String>,
    #[arg(long)]
    pub agent_name: String,
    #[arg(long)]
    pub agent_phone: String,
    #[arg(long)]
    pub agent_email: String,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub listing: ListingArgs,
    /// Image file to upload; repeat for multiple. At least one is required.
    #[arg(long = "image", required = true)]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: DbId,
    #[command(flatten)]
    pub listing: ListingArgs,
    /// New lifecycle status; omitted keeps the current one.
    #[arg(long)]
    pub status: Option<ListingStatus>,
    /// Keep the existing image sequence and append new uploads.
    #[arg(long)]
    pub keep_images: bool,
    /// Image file to upload; repeat for multiple.
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn browse_accepts_band_notation() {
        let cli = Cli::try_parse_from([
            "haven-console",
            "browse",
            "--category",
            "house",
            "--price",
            "1000000+",
        ])
        .unwrap();
        match cli.command {
            Command::Browse(args) => {
                assert_eq!(args.category, Some(Category::House));
                assert_eq!(args.price.unwrap().floor, 1_000_000);
                assert!(args.price.unwrap().ceiling.is_none());
            }
            other => panic!("expected browse, got {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["haven-console", "browse", "--category", "castle"]);
        assert!(result.is_err());
    }
}
