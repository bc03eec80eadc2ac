use async_trait::async_trait;
use model::Error;
use model::item::MovieItem;

/// Persist movie records to a named table.
///
/// Implementations are created once per process and shared between
/// invocations, so they must be safe to reuse concurrently.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Name of the table records are written to.
    fn table_name(&self) -> &str;

    /// Unconditionally write a single record, replacing any with the same key.
    async fn put_item(&self, item: &MovieItem) -> Result<(), StoreError>;
}

/// Errors arising from writing to the store.
#[derive(Debug, thiserror::Error)]
#[error("failed to store item {item_id} in {table_name}: {reason}")]
pub struct StoreError {
    pub table_name: String,
    pub item_id: String,

    pub reason: StoreErrorReason,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreErrorReason {
    // An error from the underlying store
    #[error("{0}")]
    BackendFailure(Error),
}

impl StoreError {
    pub fn new(table_name: &str, item_id: &str, reason: StoreErrorReason) -> Self {
        StoreError {
            table_name: table_name.to_string(),
            item_id: item_id.to_string(),
            reason,
        }
    }
}
