use aws_config::BehaviorVersion;
use handler::{HandlerConfig, RequestHandler};
use lambda_runtime::{service_fn, tracing};
use model::Error;
use std::sync::Arc;
use store_dynamodb::DynamoDbItemStore;

mod logger;

/// Wire the handler to a DynamoDB table.
/// The client is created once per process and reused by every invocation.
fn build_handler(dynamodb_client: aws_sdk_dynamodb::Client, config: HandlerConfig) -> RequestHandler {
    let store: DynamoDbItemStore = DynamoDbItemStore::new(dynamodb_client, config.table_name);

    RequestHandler::new(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_logging()?;

    let config: HandlerConfig = HandlerConfig::from_env()?;

    tracing::info!(table_name = %config.table_name, "Starting put item handler");

    let dynamodb_client: aws_sdk_dynamodb::Client =
        aws_sdk_dynamodb::Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await);
    let handler: RequestHandler = build_handler(dynamodb_client, config);

    lambda_runtime::run(service_fn(|event| handler.handle_event(event))).await
}
