use async_trait::async_trait;
use storefinder_core::{NewStore, RepositoryError, StoreRecord, StoreRepository};
use tokio::sync::RwLock;

/// Process-local [`StoreRepository`]; ids start at 1 and follow insertion order.
#[derive(Debug, Default)]
pub struct MemoryStoreRepository {
    stores: RwLock<Vec<StoreRecord>>,
}

impl MemoryStoreRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository pre-loaded with `stores`, assigning ids in order.
    #[must_use]
    pub fn with_stores(stores: impl IntoIterator<Item = NewStore>) -> Self {
        let records = stores
            .into_iter()
            .zip(1_i64..)
            .map(|(store, id)| store.into_record(id))
            .collect();
        Self {
            stores: RwLock::new(records),
        }
    }
}

#[async_trait]
impl StoreRepository for MemoryStoreRepository {
    async fn insert(&self, store: &NewStore) -> Result<i64, RepositoryError> {
        let mut stores = self.stores.write().await;
        let id = stores.last().map_or(1, |last| last.id + 1);
        stores.push(store.clone().into_record(id));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<StoreRecord>, RepositoryError> {
        Ok(self.stores.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> NewStore {
        NewStore {
            name: name.to_string(),
            street: "Rua XV de Novembro".to_string(),
            number: "100".to_string(),
            neighborhood: "Centro".to_string(),
            city: "Curitiba".to_string(),
            state: "PR".to_string(),
            postal_code: "80020-310".to_string(),
            latitude: -25.429,
            longitude: -49.271,
        }
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let repo = MemoryStoreRepository::new();
        let first = repo.insert(&store("A")).await.unwrap();
        let second = repo.insert(&store("B")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn list_all_preserves_insertion_order() {
        let repo = MemoryStoreRepository::with_stores([store("A"), store("B")]);
        repo.insert(&store("C")).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn ping_always_succeeds() {
        assert!(MemoryStoreRepository::new().ping().await.is_ok());
    }
}
