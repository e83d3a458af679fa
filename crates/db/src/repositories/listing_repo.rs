//! Repository for the `listings` table.
//!
//! Reads are re-sorted by creation timestamp; insertion order carries no
//! meaning. The view counter is incremented atomically in the fetch
//! statement itself, so concurrent single-record fetches cannot lose
//! increments.

use sqlx::PgPool;

use haven_core::listing::{Listing, ListingInput};
use haven_core::types::DbId;

use crate::models::listing::ListingStats;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, location, category, transaction, price, area, \
    bedrooms, bathrooms, description, images, features, \
    agent_name, agent_phone, agent_email, status, views, inquiries, created_at";

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    ///
    /// Status always starts `active` and both counters start at zero; the
    /// input's `status` field is ignored here, matching creation semantics.
    pub async fn create(
        pool: &PgPool,
        input: &ListingInput,
        image_urls: &[String],
    ) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings \
                 (title, location, category, transaction, price, area, \
                  bedrooms, bathrooms, description, images, features, \
                  agent_name, agent_phone, agent_email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.title)
            .bind(&input.location)
            .bind(input.category)
            .bind(input.transaction)
            .bind(input.price)
            .bind(input.area)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(&input.description)
            .bind(image_urls)
            .bind(&input.features)
            .bind(&input.agent_name)
            .bind(&input.agent_phone)
            .bind(&input.agent_email)
            .fetch_one(pool)
            .await
    }

    /// List all listings, newest creation timestamp first.
    ///
    /// No pagination and no server-side filtering; the browsing client
    /// filters locally.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Listing>(&query).fetch_all(pool).await
    }

    /// Find a listing by ID without side effects.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a listing by ID, atomically incrementing its view counter by
    /// exactly 1 and returning the updated row.
    pub async fn find_and_increment_views(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET views = views + 1 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Full replace of a listing's mutable fields.
    ///
    /// The image sequence is replaced with `image_urls` as assembled by the
    /// caller (prior images first when they are being kept). `status` is
    /// updated when supplied, else left unchanged. Returns `None` if no
    /// listing with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ListingInput,
        image_urls: &[String],
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET \
                 title = $2, location = $3, category = $4, transaction = $5, \
                 price = $6, area = $7, bedrooms = $8, bathrooms = $9, \
                 description = $10, images = $11, features = $12, \
                 agent_name = $13, agent_phone = $14, agent_email = $15, \
                 status = COALESCE($16, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.location)
            .bind(input.category)
            .bind(input.transaction)
            .bind(input.price)
            .bind(input.area)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(&input.description)
            .bind(image_urls)
            .bind(&input.features)
            .bind(&input.agent_name)
            .bind(&input.agent_phone)
            .bind(&input.agent_email)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing by ID, returning the deleted row so the caller can
    /// release its media. Returns `None` if no listing matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("DELETE FROM listings WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Aggregate counters for the admin dashboard in a single query.
    pub async fn stats(pool: &PgPool) -> Result<ListingStats, sqlx::Error> {
        sqlx::query_as::<_, ListingStats>(
            "SELECT \
                 COUNT(*) AS total_listings, \
                 COUNT(*) FILTER (WHERE status = 'active') AS active_listings, \
                 COALESCE(SUM(views), 0)::BIGINT AS total_views, \
                 COALESCE(SUM(inquiries), 0)::BIGINT AS total_inquiries \
             FROM listings",
        )
        .fetch_one(pool)
        .await
    }
}
