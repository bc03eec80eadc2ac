use async_trait::async_trait;
use model::item::MovieItem;
use store::StoreErrorReason::BackendFailure;
use store::{ItemStore, StoreError};
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps every written record in order, for local runs and tests.
#[derive(Clone)]
pub struct InMemoryItemStore {
    table_name: String,
    items: Arc<Mutex<Vec<MovieItem>>>,
}

impl InMemoryItemStore {
    pub fn new(table_name: &str) -> Self {
        InMemoryItemStore {
            table_name: table_name.to_string(),
            items: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Every record written so far, oldest first.
    pub fn items(&self) -> Vec<MovieItem> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_item(&self, item: &MovieItem) -> Result<(), StoreError> {
        let mut guard = self.items.lock().map_err(|err| {
            StoreError::new(&self.table_name, &item.id, BackendFailure(err.to_string().into()))
        })?;

        guard.push(item.clone());

        Ok(())
    }
}
