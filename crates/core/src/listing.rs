//! The listing entity, its enumerations, and the mutable-field input DTO.
//!
//! `Listing` doubles as the database row and the wire representation, the
//! same way the workspace shares its model types between server and console.
//! The agent contact is stored flat (`agent_name` / `agent_phone` /
//! `agent_email` columns) but serializes nested under `agent`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum title length, enforced both here and by the column type.
pub const MAX_TITLE_LEN: u64 = 100;

/// Maximum description length, enforced both here and by the column type.
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Property category. Any value outside this set is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "listing_category", rename_all = "lowercase")]
pub enum Category {
    House,
    Store,
}

/// Transaction kind offered for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "listing_transaction", rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Rent,
}

/// Listing lifecycle status. New listings always start as `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::House => "house",
            Category::Store => "store",
        }
    }
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Rent => "rent",
        }
    }
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Pending => "pending",
            ListingStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(Category::House),
            "store" => Ok(Category::Store),
            other => Err(CoreError::Validation(format!(
                "unknown category `{other}` (expected `house` or `store`)"
            ))),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(TransactionKind::Buy),
            "rent" => Ok(TransactionKind::Rent),
            other => Err(CoreError::Validation(format!(
                "unknown transaction kind `{other}` (expected `buy` or `rent`)"
            ))),
        }
    }
}

impl FromStr for ListingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ListingStatus::Active),
            "pending" => Ok(ListingStatus::Pending),
            "sold" => Ok(ListingStatus::Sold),
            other => Err(CoreError::Validation(format!(
                "unknown status `{other}` (expected `active`, `pending`, or `sold`)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Contact details of the agent responsible for a listing.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AgentContact {
    #[sqlx(rename = "agent_name")]
    pub name: String,
    #[sqlx(rename = "agent_phone")]
    pub phone: String,
    #[sqlx(rename = "agent_email")]
    pub email: String,
}

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Listing {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub category: Category,
    pub transaction: TransactionKind,
    pub price: i64,
    pub area: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub description: String,
    /// Ordered image URLs on the media host. Non-empty at creation.
    pub images: Vec<String>,
    pub features: Vec<String>,
    #[sqlx(flatten)]
    pub agent: AgentContact,
    pub status: ListingStatus,
    /// Incremented by exactly 1 on every single-record fetch.
    pub views: i32,
    pub inquiries: i32,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Mutable listing fields as submitted by a create or update request.
///
/// Image URLs are not part of the DTO: they are produced by the media
/// gateway after upload and passed to the repository separately. `status`
/// is only honored on update; creation always starts `active`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListingInput {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    pub category: Category,
    pub transaction: TransactionKind,
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "area must be non-negative"))]
    pub area: i32,
    #[validate(range(min = 0, message = "bedrooms must be non-negative"))]
    pub bedrooms: i32,
    #[validate(range(min = 0, message = "bathrooms must be non-negative"))]
    pub bathrooms: i32,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: String,
    pub features: Vec<String>,
    #[validate(length(min = 1, message = "agent name is required"))]
    pub agent_name: String,
    #[validate(length(min = 1, message = "agent phone is required"))]
    pub agent_phone: String,
    #[validate(email(message = "agent email must be a valid address"))]
    pub agent_email: String,
    pub status: Option<ListingStatus>,
}

impl ListingInput {
    /// Run field validation, collapsing validator output into the domain error.
    pub fn validated(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ListingInput {
        ListingInput {
            title: "Sunny corner house".to_string(),
            location: "Riverside".to_string(),
            category: Category::House,
            transaction: TransactionKind::Buy,
            price: 450_000,
            area: 120,
            bedrooms: 3,
            bathrooms: 2,
            description: "Bright family home close to the park.".to_string(),
            features: vec!["garden".to_string()],
            agent_name: "Dana Reyes".to_string(),
            agent_phone: "+1-555-0134".to_string(),
            agent_email: "dana@example.com".to_string(),
            status: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(sample_input().validated().is_ok());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut input = sample_input();
        input.title = "x".repeat(101);
        let err = input.validated().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut input = sample_input();
        input.agent_email = "not-an-address".to_string();
        let err = input.validated().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut input = sample_input();
        input.price = -1;
        assert!(input.validated().is_err());
    }

    #[test]
    fn enums_parse_only_known_values() {
        assert_eq!("house".parse::<Category>().unwrap(), Category::House);
        assert_eq!("rent".parse::<TransactionKind>().unwrap(), TransactionKind::Rent);
        assert_eq!("sold".parse::<ListingStatus>().unwrap(), ListingStatus::Sold);
        assert!("apartment".parse::<Category>().is_err());
        assert!("lease".parse::<TransactionKind>().is_err());
        assert!("archived".parse::<ListingStatus>().is_err());
    }
}
