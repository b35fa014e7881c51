use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductDraft};
use business::domain::product::repository::ProductRepository;

use super::entity::{ProductDocument, ProductEntity};

/// Product documents kept as JSONB rows in the `products` table.
///
/// `name` is duplicated into its own column so listings can be ordered by it.
pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(
            "SELECT id, data, created_at, updated_at FROM products ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list products");
            RepositoryError::DatabaseError
        })?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            "SELECT id, data, created_at, updated_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(product_id = %id, error = %e, "Failed to load product");
            RepositoryError::DatabaseError
        })?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let document = ProductDocument::from(draft);

        sqlx::query(
            r#"INSERT INTO products (id, name, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)"#,
        )
        .bind(id)
        .bind(&document.name)
        .bind(Json(&document))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(product_id = %id, error = %e, "Failed to insert product");
            RepositoryError::Persistence
        })?;

        Ok(Product::from_repository(id, draft.clone(), now, now))
    }

    async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let document = ProductDocument::from(draft);

        let entity = sqlx::query_as::<_, ProductEntity>(
            r#"UPDATE products SET
                name = $2,
                data = $3,
                updated_at = $4
            WHERE id = $1
            RETURNING id, data, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&document.name)
        .bind(Json(&document))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(product_id = %id, error = %e, "Failed to update product");
            RepositoryError::Persistence
        })?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(product_id = %id, error = %e, "Failed to delete product");
                RepositoryError::Persistence
            })?;

        if result.rows_affected() == 0 {
            tracing::debug!(product_id = %id, "Product already absent");
        }
        Ok(true)
    }
}
