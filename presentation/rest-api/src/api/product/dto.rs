use chrono::{DateTime, Utc};
use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};

use business::domain::product::model::Product;
use business::domain::product::value_objects::{ProductColor, ProductImage};

use super::form::RawProductFields;

/// Multipart body for creating or updating a product.
#[derive(Multipart)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    /// Decimal price, e.g. "49.90"
    pub price: String,
    pub category: String,
    pub style: Option<String>,
    /// Comma-separated size labels, e.g. "S,M,L"
    pub sizes: Option<String>,
    /// Comma-separated `Name:Hex` pairs, e.g. "Navy:#000080,Ivory:#FFFFF0"
    pub colors: Option<String>,
    pub stock: String,
    /// "true" marks the product as featured
    #[oai(rename = "isFeatured")]
    pub is_featured: Option<String>,
    #[oai(rename = "seasonalCollection")]
    pub seasonal_collection: Option<String>,
    /// Image files, in display order. Required on create; on update they
    /// replace the current images.
    #[oai(rename = "productImages")]
    pub product_images: Vec<Upload>,
}

impl ProductForm {
    pub fn into_parts(self) -> (RawProductFields, Vec<Upload>) {
        let raw = RawProductFields {
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
        };
        (raw, self.product_images)
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductColorResponse {
    pub name: String,
    pub hex: String,
}

impl From<ProductColor> for ProductColorResponse {
    fn from(color: ProductColor) -> Self {
        Self {
            name: color.name,
            hex: color.hex,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductImageResponse {
    /// Public URL of the image
    pub url: String,
    /// Object store key
    pub path: String,
    /// Sanitized original file name
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
}

impl From<ProductImage> for ProductImageResponse {
    fn from(image: ProductImage) -> Self {
        Self {
            url: image.url,
            path: image.path,
            name: image.name,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Product unique identifier
    pub id: String,
    pub name: String,
    pub description: String,
    /// Decimal price as a string to keep precision
    pub price: String,
    pub category: String,
    #[oai(skip_serializing_if_is_none)]
    pub style: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<ProductColorResponse>,
    pub stock: u32,
    pub is_featured: bool,
    #[oai(skip_serializing_if_is_none)]
    pub seasonal_collection: Option<String>,
    /// Images in display order; the first one is the main image
    pub images: Vec<ProductImageResponse>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            category: product.category,
            style: product.style,
            sizes: product.sizes,
            colors: product.colors.into_iter().map(Into::into).collect(),
            stock: product.stock,
            is_featured: product.is_featured,
            seasonal_collection: product.seasonal_collection,
            images: product.images.into_iter().map(Into::into).collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
