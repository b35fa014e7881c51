use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use uuid::Uuid;

use super::errors::ProductError;
use super::value_objects::{ProductColor, ProductImage};

/// Typed product attributes as handed over by the form validation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub style: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<ProductColor>,
    pub stock: u32,
    pub is_featured: bool,
    pub seasonal_collection: Option<String>,
}

impl ProductFields {
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::NameEmpty);
        }
        if self.description.trim().is_empty() {
            return Err(ProductError::DescriptionEmpty);
        }
        if self.category.trim().is_empty() {
            return Err(ProductError::CategoryEmpty);
        }
        if self.price <= BigDecimal::zero() {
            return Err(ProductError::PriceNotPositive);
        }
        Ok(())
    }
}

/// A complete product record without an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub fields: ProductFields,
    pub images: Vec<ProductImage>,
}

impl ProductDraft {
    pub fn new(fields: ProductFields, images: Vec<ProductImage>) -> Self {
        Self { fields, images }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub style: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<ProductColor>,
    pub stock: u32,
    pub is_featured: bool,
    pub seasonal_collection: Option<String>,
    /// The first image is the canonical display image.
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        draft: ProductDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let ProductDraft { fields, images } = draft;
        Self {
            id,
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
            images,
            created_at,
            updated_at,
        }
    }

    pub fn canonical_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }

    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            category: self.category.clone(),
            style: self.style.clone(),
            sizes: self.sizes.clone(),
            colors: self.colors.clone(),
            stock: self.stock,
            is_featured: self.is_featured,
            seasonal_collection: self.seasonal_collection.clone(),
        }
    }

    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft::new(self.fields(), self.images.clone())
    }
}
