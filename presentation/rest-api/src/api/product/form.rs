use std::str::FromStr;

use bigdecimal::BigDecimal;
use poem::http::StatusCode;
use poem_openapi::payload::Json;
use poem_openapi::types::multipart::Upload;

use business::domain::product::model::ProductFields;
use business::domain::product::value_objects::{ImageUpload, ProductColor};

use crate::api::error::{ErrorResponse, IntoErrorResponse};

/// Errors raised while turning submitted form values into typed fields.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("form.price_invalid")]
    PriceInvalid,
    #[error("form.stock_invalid")]
    StockInvalid,
    #[error("form.sizes_invalid")]
    SizesInvalid,
    #[error("form.colors_invalid")]
    ColorsInvalid,
    #[error("form.image_unreadable")]
    ImageUnreadable,
}

impl IntoErrorResponse for FormError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        (StatusCode::BAD_REQUEST, ErrorResponse::validation(self.to_string()))
    }
}

/// Text values of a product form as submitted.
#[derive(Debug, Clone, Default)]
pub struct RawProductFields {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub style: Option<String>,
    pub sizes: Option<String>,
    pub colors: Option<String>,
    pub stock: String,
    pub is_featured: Option<String>,
    pub seasonal_collection: Option<String>,
}

/// Parses the text values of a product form.
///
/// Presence checks (empty name, non-positive price, ...) are left to the
/// save use case so every caller gets the same rules.
pub fn parse_fields(raw: RawProductFields) -> Result<ProductFields, FormError> {
    Ok(ProductFields {
        name: raw.name.trim().to_string(),
        description: raw.description.trim().to_string(),
        price: parse_price(&raw.price)?,
        category: raw.category.trim().to_string(),
        style: non_blank(raw.style),
        sizes: parse_list(raw.sizes.as_deref(), parse_sizes, FormError::SizesInvalid)?,
        colors: parse_list(raw.colors.as_deref(), parse_colors, FormError::ColorsInvalid)?,
        stock: parse_stock(&raw.stock)?,
        is_featured: parse_flag(raw.is_featured.as_deref()),
        seasonal_collection: non_blank(raw.seasonal_collection),
    })
}

/// Splits a comma-separated size list, dropping blank entries.
pub fn parse_sizes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|size| !size.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses comma-separated `Name:Hex` pairs. Entries that are not exactly one
/// name and one hex value are dropped.
pub fn parse_colors(raw: &str) -> Vec<ProductColor> {
    raw.split(',')
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            match parts.as_slice() {
                [name, hex] if !name.is_empty() && !hex.is_empty() => {
                    Some(ProductColor::new(*name, *hex))
                }
                _ => None,
            }
        })
        .collect()
}

/// Only the literal "true" enables a flag.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn parse_price(raw: &str) -> Result<BigDecimal, FormError> {
    BigDecimal::from_str(raw.trim()).map_err(|_| FormError::PriceInvalid)
}

fn parse_stock(raw: &str) -> Result<u32, FormError> {
    raw.trim().parse().map_err(|_| FormError::StockInvalid)
}

/// A non-blank list that parses to nothing is rejected; an absent one is empty.
fn parse_list<T>(
    raw: Option<&str>,
    parse: fn(&str) -> Vec<T>,
    invalid: FormError,
) -> Result<Vec<T>, FormError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(value) => {
            let items = parse(value);
            if items.is_empty() {
                Err(invalid)
            } else {
                Ok(items)
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads submitted files in order, skipping empty ones.
pub async fn collect_images(uploads: Vec<Upload>) -> Result<Vec<ImageUpload>, FormError> {
    let mut images = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let file_name = upload.file_name().unwrap_or_default().to_string();
        let content_type = upload.content_type().unwrap_or_default().to_string();
        let bytes = upload
            .into_vec()
            .await
            .map_err(|_| FormError::ImageUnreadable)?;
        if bytes.is_empty() {
            continue;
        }
        images.push(ImageUpload::new(file_name, content_type, bytes));
    }
    Ok(images)
}
