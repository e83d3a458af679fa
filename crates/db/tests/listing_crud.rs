//! Integration tests for the listing repository.
//!
//! Exercises the repository layer against a real database: creation
//! defaults, recency ordering, the atomic view increment, full-replace
//! updates, and delete semantics.

use sqlx::PgPool;

use haven_core::listing::{Category, ListingInput, ListingStatus, TransactionKind};
use haven_db::repositories::ListingRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_input(title: &str, price: i64) -> ListingInput {
    ListingInput {
        title: title.to_string(),
        location: "Riverside".to_string(),
        category: Category::House,
        transaction: TransactionKind::Buy,
        price,
        area: 120,
        bedrooms: 3,
        bathrooms: 2,
        description: "Bright family home close to the park.".to_string(),
        features: vec!["garden".to_string(), "garage".to_string()],
        agent_name: "Dana Reyes".to_string(),
        agent_phone: "+1-555-0134".to_string(),
        agent_email: "dana@example.com".to_string(),
        status: None,
    }
}

fn urls(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("https://media.test/haven/img-{i}.jpg"))
        .collect()
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_applies_defaults(pool: PgPool) {
    let images = urls(2);
    let listing = ListingRepo::create(&pool, &new_input("First", 450_000), &images)
        .await
        .unwrap();

    assert_eq!(listing.status, ListingStatus::Active);
    assert_eq!(listing.views, 0);
    assert_eq!(listing.inquiries, 0);
    assert_eq!(listing.images, images);
    assert_eq!(listing.features.len(), 2);
    assert_eq!(listing.agent.email, "dana@example.com");
}

#[sqlx::test]
async fn create_ignores_supplied_status(pool: PgPool) {
    let mut input = new_input("Pre-sold", 450_000);
    input.status = Some(ListingStatus::Sold);

    let listing = ListingRepo::create(&pool, &input, &urls(1)).await.unwrap();
    assert_eq!(listing.status, ListingStatus::Active);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn list_all_is_newest_first(pool: PgPool) {
    let a = ListingRepo::create(&pool, &new_input("A", 1), &urls(1))
        .await
        .unwrap();
    let b = ListingRepo::create(&pool, &new_input("B", 2), &urls(1))
        .await
        .unwrap();
    let c = ListingRepo::create(&pool, &new_input("C", 3), &urls(1))
        .await
        .unwrap();

    // Backdate the middle row so ordering cannot come from insert order alone.
    sqlx::query("UPDATE listings SET created_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(b.id)
        .execute(&pool)
        .await
        .unwrap();

    let all = ListingRepo::list_all(&pool).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[sqlx::test]
async fn two_fetches_increment_views_by_exactly_two(pool: PgPool) {
    let created = ListingRepo::create(&pool, &new_input("Viewed", 1), &urls(1))
        .await
        .unwrap();

    let first = ListingRepo::find_and_increment_views(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.views, 1);

    let second = ListingRepo::find_and_increment_views(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.views, 2);

    // The side-effect-free read observes the persisted count.
    let stored = ListingRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.views, 2);
}

#[sqlx::test]
async fn increment_on_missing_id_is_none(pool: PgPool) {
    let missing = ListingRepo::find_and_increment_views(&pool, 9999).await.unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn update_replaces_fields_and_preserves_status_when_unset(pool: PgPool) {
    let created = ListingRepo::create(&pool, &new_input("Old title", 100), &urls(2))
        .await
        .unwrap();

    let mut input = new_input("New title", 200);
    input.location = "Hillcrest".to_string();

    let new_images = urls(3);
    let updated = ListingRepo::update(&pool, created.id, &input, &new_images)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.location, "Hillcrest");
    assert_eq!(updated.price, 200);
    assert_eq!(updated.images, new_images);
    assert_eq!(updated.status, ListingStatus::Active);
}

#[sqlx::test]
async fn update_applies_supplied_status(pool: PgPool) {
    let created = ListingRepo::create(&pool, &new_input("For sale", 100), &urls(1))
        .await
        .unwrap();

    let mut input = new_input("For sale", 100);
    input.status = Some(ListingStatus::Sold);

    let updated = ListingRepo::update(&pool, created.id, &input, &urls(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, ListingStatus::Sold);
}

#[sqlx::test]
async fn update_missing_id_is_none(pool: PgPool) {
    let result = ListingRepo::update(&pool, 9999, &new_input("Ghost", 1), &urls(1))
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn delete_returns_the_row_and_removes_it(pool: PgPool) {
    let images = urls(2);
    let created = ListingRepo::create(&pool, &new_input("Doomed", 1), &images)
        .await
        .unwrap();

    let deleted = ListingRepo::delete(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.images, images);

    assert!(ListingRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn delete_missing_id_leaves_collection_unchanged(pool: PgPool) {
    ListingRepo::create(&pool, &new_input("Survivor", 1), &urls(1))
        .await
        .unwrap();

    let deleted = ListingRepo::delete(&pool, 9999).await.unwrap();
    assert!(deleted.is_none());
    assert_eq!(ListingRepo::list_all(&pool).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn stats_aggregate_counts_and_views(pool: PgPool) {
    let a = ListingRepo::create(&pool, &new_input("A", 1), &urls(1))
        .await
        .unwrap();
    let b = ListingRepo::create(&pool, &new_input("B", 2), &urls(1))
        .await
        .unwrap();

    let mut input = new_input("B", 2);
    input.status = Some(ListingStatus::Sold);
    ListingRepo::update(&pool, b.id, &input, &urls(1))
        .await
        .unwrap()
        .unwrap();

    ListingRepo::find_and_increment_views(&pool, a.id)
        .await
        .unwrap()
        .unwrap();
    ListingRepo::find_and_increment_views(&pool, a.id)
        .await
        .unwrap()
        .unwrap();

    let stats = ListingRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_listings, 2);
    assert_eq!(stats.active_listings, 1);
    assert_eq!(stats.total_views, 2);
    assert_eq!(stats.total_inquiries, 0);
}
