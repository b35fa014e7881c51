use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use business::domain::product::model::{Product, ProductDraft, ProductFields};
use business::domain::product::value_objects::{ProductColor, ProductImage};

/// JSON body of a product document, stored in the `data` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ProductColor>,
    pub stock: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_collection: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl From<&ProductDraft> for ProductDocument {
    fn from(draft: &ProductDraft) -> Self {
        let fields = draft.fields.clone();
        Self {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            style: fields.style,
            sizes: fields.sizes,
            colors: fields.colors,
            stock: fields.stock,
            is_featured: fields.is_featured,
            seasonal_collection: fields.seasonal_collection,
            images: draft.images.clone(),
        }
    }
}

impl ProductDocument {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft::new(
            ProductFields {
                name: self.name,
                description: self.description,
                price: self.price,
                category: self.category,
                style: self.style,
                sizes: self.sizes,
                colors: self.colors,
                stock: self.stock,
                is_featured: self.is_featured,
                seasonal_collection: self.seasonal_collection,
            },
            self.images,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub data: Json<ProductDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.data.0.into_draft(),
            self.created_at,
            self.updated_at,
        )
    }
}
