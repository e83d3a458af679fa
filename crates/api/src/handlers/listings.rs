//! Handlers for the `/listings` resource.
//!
//! Create and update accept multipart forms: scalar fields, repeated
//! `features`, repeated `images` file parts, and (on update) a
//! `keepExistingImages` flag. Images are uploaded to the media gateway
//! sequentially before the row is written; a single upload failure aborts
//! the whole mutation and already-uploaded images in the batch are not
//! cleaned up. Nothing ties the gateway to the store transactionally.

use std::str::FromStr;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use haven_core::error::CoreError;
use haven_core::listing::{Category, Listing, ListingInput, ListingStatus, TransactionKind};
use haven_core::types::DbId;
use haven_db::repositories::ListingRepo;
use haven_media::{public_id_for_url, MediaGateway, StoredImage, UploadFile};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// Raw multipart fields accumulated from a create/update request.
#[derive(Default)]
struct ListingForm {
    title: Option<String>,
    location: Option<String>,
    category: Option<String>,
    transaction: Option<String>,
    price: Option<String>,
    area: Option<String>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    description: Option<String>,
    features: Vec<String>,
    agent_name: Option<String>,
    agent_phone: Option<String>,
    agent_email: Option<String>,
    status: Option<String>,
    keep_existing_images: bool,
    images: Vec<UploadFile>,
}

/// Drain a multipart stream into a [`ListingForm`]. Unknown fields are
/// ignored; empty image parts (no file selected) are skipped.
async fn read_form(multipart: &mut Multipart) -> Result<ListingForm, AppError> {
    let mut form = ListingForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "images" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !data.is_empty() {
                    form.images.push(UploadFile {
                        filename,
                        content_type,
                        bytes: data.to_vec(),
                    });
                }
            }
            "features" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !text.is_empty() {
                    form.features.push(text);
                }
            }
            "keepExistingImages" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.keep_existing_images = text == "true";
            }
            other => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let slot = match other {
                    "title" => &mut form.title,
                    "location" => &mut form.location,
                    "category" => &mut form.category,
                    "transaction" => &mut form.transaction,
                    "price" => &mut form.price,
                    "area" => &mut form.area,
                    "bedrooms" => &mut form.bedrooms,
                    "bathrooms" => &mut form.bathrooms,
                    "description" => &mut form.description,
                    "agent_name" => &mut form.agent_name,
                    "agent_phone" => &mut form.agent_phone,
                    "agent_email" => &mut form.agent_email,
                    "status" => &mut form.status,
                    _ => continue, // ignore unknown fields
                };
                *slot = Some(text);
            }
        }
    }

    Ok(form)
}

/// Pull a required scalar out of the form or fail validation.
fn required(value: Option<&String>, name: &str) -> Result<String, AppError> {
    value.cloned().ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "missing required field `{name}`"
        )))
    })
}

/// Parse a required numeric field, rejecting non-numeric input.
fn required_number<T: FromStr>(value: Option<&String>, name: &str) -> Result<T, AppError> {
    required(value, name)?.parse().map_err(|_| {
        AppError::Core(CoreError::Validation(format!("`{name}` must be a number")))
    })
}

/// Parse an optional count, defaulting to 0 when absent or non-numeric.
fn count_or_zero(value: Option<&String>) -> i32 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Assemble and validate a [`ListingInput`] from the raw form fields.
fn parse_input(form: &ListingForm) -> Result<ListingInput, AppError> {
    let category = Category::from_str(&required(form.category.as_ref(), "category")?)
        .map_err(AppError::Core)?;
    let transaction =
        TransactionKind::from_str(&required(form.transaction.as_ref(), "transaction")?)
            .map_err(AppError::Core)?;
    let status = form
        .status
        .as_deref()
        .map(ListingStatus::from_str)
        .transpose()
        .map_err(AppError::Core)?;

    let input = ListingInput {
        title: required(form.title.as_ref(), "title")?,
        location: required(form.location.as_ref(), "location")?,
        category,
        transaction,
        price: required_number(form.price.as_ref(), "price")?,
        area: required_number(form.area.as_ref(), "area")?,
        bedrooms: count_or_zero(form.bedrooms.as_ref()),
        bathrooms: count_or_zero(form.bathrooms.as_ref()),
        description: required(form.description.as_ref(), "description")?,
        features: form.features.clone(),
        agent_name: required(form.agent_name.as_ref(), "agent_name")?,
        agent_phone: required(form.agent_phone.as_ref(), "agent_phone")?,
        agent_email: required(form.agent_email.as_ref(), "agent_email")?,
        status,
    };
    input.validated().map_err(AppError::Core)?;
    Ok(input)
}

/// Upload image files to the gateway one at a time.
///
/// The first failure aborts the mutation; earlier uploads from the same
/// batch are left on the host.
async fn upload_images(
    gateway: &dyn MediaGateway,
    images: Vec<UploadFile>,
) -> Result<Vec<StoredImage>, AppError> {
    let mut stored = Vec::with_capacity(images.len());
    for file in images {
        stored.push(gateway.upload(file).await?);
    }
    Ok(stored)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /listings
///
/// Full collection, newest creation timestamp first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Listing>>> {
    let listings = ListingRepo::list_all(&state.pool).await?;
    Ok(Json(listings))
}

/// GET /listings/{id}
///
/// Increments the listing's view counter as a side effect.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Listing>> {
    let listing = ListingRepo::find_and_increment_views(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(listing))
}

/// POST /listings
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Listing>)> {
    let form = read_form(&mut multipart).await?;
    let input = parse_input(&form)?;

    let uploaded = upload_images(state.media.as_ref(), form.images).await?;
    if uploaded.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "at least one image is required".into(),
        )));
    }
    let image_urls: Vec<String> = uploaded.into_iter().map(|s| s.url).collect();

    let listing = ListingRepo::create(&state.pool, &input, &image_urls).await?;

    tracing::info!(
        listing_id = listing.id,
        title = %listing.title,
        images = listing.images.len(),
        "Listing created",
    );

    Ok((StatusCode::CREATED, Json(listing)))
}

/// PUT /listings/{id}
///
/// Full replace of mutable fields. With `keepExistingImages=true` the prior
/// image sequence is preserved and new uploads are appended; otherwise only
/// the new uploads remain.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<Listing>> {
    let existing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    let form = read_form(&mut multipart).await?;
    let input = parse_input(&form)?;

    let uploaded = upload_images(state.media.as_ref(), form.images).await?;

    let mut image_urls = if form.keep_existing_images {
        existing.images
    } else {
        Vec::new()
    };
    image_urls.extend(uploaded.into_iter().map(|s| s.url));

    let listing = ListingRepo::update(&state.pool, id, &input, &image_urls)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    Ok(Json(listing))
}

/// Response body for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// DELETE /listings/{id}
///
/// Removes the record, then attempts to delete each associated media object.
/// Per-image deletion failures are logged and swallowed; the record deletion
/// stands regardless.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = ListingRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    for image_url in &deleted.images {
        match public_id_for_url(image_url) {
            Some(public_id) => {
                if let Err(e) = state.media.delete(&public_id).await {
                    tracing::warn!(
                        listing_id = id,
                        public_id = %public_id,
                        error = %e,
                        "Failed to delete listing image from media host",
                    );
                }
            }
            None => {
                tracing::warn!(
                    listing_id = id,
                    url = %image_url,
                    "Could not derive media public id from image URL",
                );
            }
        }
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Listing deleted successfully".to_string(),
    }))
}
