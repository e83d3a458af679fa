//! Terminal rendering for listings and dashboard counters.

use haven_core::listing::Listing;

use crate::client::DashboardStats;

/// Width of the location column in the table view.
const LOCATION_WIDTH: usize = 20;

/// One table row for a listing.
pub fn listing_line(listing: &Listing) -> String {
    format!(
        "{:>5}  {:<6} {:<4} {:>12} {:<width$} {}",
        listing.id,
        listing.category.as_str(),
        listing.transaction.as_str(),
        listing.price,
        truncate(&listing.location, LOCATION_WIDTH),
        listing.title,
        width = LOCATION_WIDTH,
    )
}

/// Print the table view of a (possibly filtered) collection.
pub fn print_listing_table(listings: &[&Listing]) {
    if listings.is_empty() {
        println!("No listings match.");
        return;
    }
    println!(
        "{:>5}  {:<6} {:<4} {:>12} {:<width$} {}",
        "ID",
        "TYPE",
        "TXN",
        "PRICE",
        "LOCATION",
        "TITLE",
        width = LOCATION_WIDTH,
    );
    for listing in listings {
        println!("{}", listing_line(listing));
    }
}

/// Print one listing in detail.
pub fn print_listing_detail(listing: &Listing) {
    println!("#{} {}", listing.id, listing.title);
    println!("  {} / {} / {}", listing.category, listing.transaction, listing.status);
    println!("  Location:  {}", listing.location);
    println!("  Price:     {}", listing.price);
    println!("  Area:      {} sqm", listing.area);
    println!("  Rooms:     {} bed, {} bath", listing.bedrooms, listing.bathrooms);
    if !listing.features.is_empty() {
        println!("  Features:  {}", listing.features.join(", "));
    }
    println!("  Agent:     {} <{}> {}", listing.agent.name, listing.agent.email, listing.agent.phone);
    println!("  Views:     {}  Inquiries: {}", listing.views, listing.inquiries);
    println!("  Created:   {}", listing.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Images:");
    for url in &listing.images {
        println!("    {url}");
    }
    println!();
    println!("{}", listing.description);
}

/// Print the admin dashboard counters.
pub fn print_dashboard(stats: &DashboardStats) {
    println!("Listings:   {} total, {} active", stats.total_listings, stats.active_listings);
    println!("Views:      {}", stats.total_views);
    println!("Inquiries:  {}", stats.total_inquiries);
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::listing::{AgentContact, Category, ListingStatus, TransactionKind};

    fn sample() -> Listing {
        Listing {
            id: 7,
            title: "Sunny corner house".to_string(),
            location: "Riverside".to_string(),
            category: Category::House,
            transaction: TransactionKind::Buy,
            price: 450_000,
            area: 120,
            bedrooms: 3,
            bathrooms: 2,
            description: "Bright family home.".to_string(),
            images: vec!["https://media.test/haven/a.jpg".to_string()],
            features: vec![],
            agent: AgentContact {
                name: "Dana Reyes".to_string(),
                phone: "+1-555-0134".to_string(),
                email: "dana@example.com".to_string(),
            },
            status: ListingStatus::Active,
            views: 4,
            inquiries: 1,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn listing_line_carries_the_key_columns() {
        let line = listing_line(&sample());
        assert!(line.contains("house"));
        assert!(line.contains("buy"));
        assert!(line.contains("450000"));
        assert!(line.contains("Sunny corner house"));
    }

    #[test]
    fn truncate_keeps_short_strings_and_marks_long_ones() {
        assert_eq!(truncate("short", 20), "short");
        let cut = truncate("a very long location name indeed", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
