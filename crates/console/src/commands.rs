//! Command implementations: each wraps one or two API calls and renders the
//! result. Mutations re-fetch the collection afterwards so the operator sees
//! the refreshed state; failures surface once and are never retried.

use anyhow::Context;
use dialoguer::{Confirm, Password};

use haven_core::filter::ListingFilter;
use haven_core::listing::ListingInput;
use haven_core::types::DbId;

use crate::cli::{AddArgs, BrowseArgs, EditArgs, ListingArgs};
use crate::client::ApiClient;
use crate::output;

impl ListingArgs {
    fn into_input(self) -> ListingInput {
        ListingInput {
            title: self.title,
            location: self.location,
            category: self.category,
            transaction: self.transaction,
            price: self.price,
            area: self.area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            description: self.description,
            features: self.features,
            agent_name: self.agent_name,
            agent_phone: self.agent_phone,
            agent_email: self.agent_email,
            status: None,
        }
    }
}

pub async fn browse(client: &ApiClient, args: BrowseArgs) -> anyhow::Result<()> {
    let filter = ListingFilter {
        category: args.category,
        transaction: args.transaction,
        price_band: args.price,
        location: args.location,
    };

    let listings = client.list().await?;
    let selected = filter.apply(&listings);
    output::print_listing_table(&selected);
    println!("{} of {} listings match", selected.len(), listings.len());
    Ok(())
}

pub async fn show(client: &ApiClient, id: DbId) -> anyhow::Result<()> {
    let listing = client.get(id).await?;
    output::print_listing_detail(&listing);
    Ok(())
}

pub async fn add(client: &ApiClient, args: AddArgs) -> anyhow::Result<()> {
    let input = args.listing.into_input();
    input
        .validated()
        .context("listing fields failed validation")?;

    let listing = client.create(&input, &args.images).await?;
    println!(
        "Created listing #{} with {} image(s)",
        listing.id,
        listing.images.len()
    );
    refresh(client).await
}

pub async fn edit(client: &ApiClient, args: EditArgs) -> anyhow::Result<()> {
    let mut input = args.listing.into_input();
    input.status = args.status;
    input
        .validated()
        .context("listing fields failed validation")?;

    let listing = client
        .update(args.id, &input, &args.images, args.keep_images)
        .await?;
    println!(
        "Updated listing #{} ({} image(s), status {})",
        listing.id,
        listing.images.len(),
        listing.status
    );
    refresh(client).await
}

pub async fn delete(client: &ApiClient, id: DbId, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete listing #{id} and its hosted images? This cannot be undone"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let outcome = client.delete(id).await?;
    println!("{}", outcome.message);
    refresh(client).await
}

pub async fn login(client: &ApiClient, username: String) -> anyhow::Result<()> {
    let password = Password::new().with_prompt("Password").interact()?;
    let session = client.login(&username, &password).await?;
    println!(
        "Logged in as {} (session valid until {})",
        session.username,
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

pub async fn logout(client: &ApiClient) -> anyhow::Result<()> {
    client.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn dashboard(client: &ApiClient) -> anyhow::Result<()> {
    let stats = client.dashboard().await?;
    output::print_dashboard(&stats);
    Ok(())
}

/// Re-fetch the collection after a mutation and show the refreshed state.
async fn refresh(client: &ApiClient) -> anyhow::Result<()> {
    let listings = client.list().await?;
    let all: Vec<&_> = listings.iter().collect();
    println!();
    output::print_listing_table(&all);
    Ok(())
}
