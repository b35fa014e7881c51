use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use business::domain::errors::StorageError;
use business::domain::product::storage::ObjectStore;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub public: bool,
}

/// Process-local object store, for development and tests.
pub struct InMemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://catalog")
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
                public: false,
            },
        );
        Ok(format!("{}/{}", self.base_url, path))
    }

    async fn make_public(&self, path: &str) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        let object = objects.get_mut(path).ok_or(StorageError::Write)?;
        object.public = true;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_store_private_object_and_return_its_url() {
        let store = InMemoryObjectStore::new("https://cdn.test/");

        let url = store
            .put("products/1/a-coat.png", b"png", "image/png")
            .await
            .unwrap();

        assert_eq!(url, "https://cdn.test/products/1/a-coat.png");
        let stored = store.get("products/1/a-coat.png").await.unwrap();
        assert_eq!(stored.bytes, b"png".to_vec());
        assert_eq!(stored.content_type, "image/png");
        assert!(!stored.public);
    }

    #[tokio::test]
    async fn should_mark_object_public() {
        let store = InMemoryObjectStore::default();
        store.put("products/1/a.png", b"x", "image/png").await.unwrap();

        store.make_public("products/1/a.png").await.unwrap();

        assert!(store.get("products/1/a.png").await.unwrap().public);
    }

    #[tokio::test]
    async fn should_fail_to_publish_missing_object() {
        let store = InMemoryObjectStore::default();

        let result = store.make_public("products/1/missing.png").await;

        assert_eq!(result, Err(StorageError::Write));
    }

    #[tokio::test]
    async fn should_report_not_found_when_deleting_missing_object() {
        let store = InMemoryObjectStore::default();
        store.put("products/1/a.png", b"x", "image/png").await.unwrap();

        assert_eq!(store.delete("products/1/a.png").await, Ok(()));
        assert_eq!(
            store.delete("products/1/a.png").await,
            Err(StorageError::NotFound)
        );
        assert!(store.is_empty().await);
    }
}
