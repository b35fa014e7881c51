use crate::domain::errors::{RepositoryError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.images_required")]
    ImagesRequired,
    #[error("product.too_many_images")]
    TooManyImages,
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.description_empty")]
    DescriptionEmpty,
    #[error("product.category_empty")]
    CategoryEmpty,
    #[error("product.price_not_positive")]
    PriceNotPositive,
    #[error("product.not_found")]
    NotFound,
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    /// True when the caller supplied data that violates a precondition.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProductError::ImagesRequired
                | ProductError::TooManyImages
                | ProductError::NameEmpty
                | ProductError::DescriptionEmpty
                | ProductError::CategoryEmpty
                | ProductError::PriceNotPositive
        )
    }
}

/// Maps a repository miss onto the product-level not found error.
pub(crate) fn not_found_as_product_error(err: RepositoryError) -> ProductError {
    match err {
        RepositoryError::NotFound => ProductError::NotFound,
        other => ProductError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_validation_errors() {
        assert!(ProductError::ImagesRequired.is_validation());
        assert!(ProductError::PriceNotPositive.is_validation());
        assert!(!ProductError::NotFound.is_validation());
        assert!(!ProductError::Storage(StorageError::Write).is_validation());
    }

    #[test]
    fn should_map_repository_not_found_to_product_not_found() {
        assert!(matches!(
            not_found_as_product_error(RepositoryError::NotFound),
            ProductError::NotFound
        ));
        assert!(matches!(
            not_found_as_product_error(RepositoryError::Persistence),
            ProductError::Repository(RepositoryError::Persistence)
        ));
    }

    #[test]
    fn should_render_code_style_messages() {
        assert_eq!(ProductError::NotFound.to_string(), "product.not_found");
        assert_eq!(
            ProductError::Storage(StorageError::Write).to_string(),
            "storage.write"
        );
    }
}
