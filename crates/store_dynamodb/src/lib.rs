use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use model::item::MovieItem;
use store::StoreErrorReason::BackendFailure;
use store::{ItemStore, StoreError};
use std::collections::HashMap;

pub const ID: &str = "id";
pub const YEAR: &str = "year";
pub const TITLE: &str = "title";

/// Writes movie records to a DynamoDB table.
pub struct DynamoDbItemStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoDbItemStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        DynamoDbItemStore {
            table_name,
            dynamodb_client,
        }
    }
}

#[async_trait]
impl ItemStore for DynamoDbItemStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_item(&self, item: &MovieItem) -> Result<(), StoreError> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_attributes(item)))
            .send()
            .await
            .map_err(|err| {
                StoreError::new(
                    &self.table_name,
                    &item.id,
                    BackendFailure(DisplayErrorContext(&err).to_string().into()),
                )
            })?;

        Ok(())
    }
}

/// The year is numeric in the table, everything else is a string.
pub fn to_attributes(item: &MovieItem) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (YEAR.to_string(), AttributeValue::N(item.year.clone())),
        (TITLE.to_string(), AttributeValue::S(item.title.clone())),
        (ID.to_string(), AttributeValue::S(item.id.clone())),
    ])
}
