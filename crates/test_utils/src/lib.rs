use async_trait::async_trait;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
use aws_smithy_mocks::{mock, mock_client, Rule};
use model::item::MovieItem;
use store::StoreErrorReason::BackendFailure;
use store::{ItemStore, StoreError};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Test table and request context values
pub const TEST_TABLE: &str = "movies";
pub const TEST_REQUEST_ID: &str = "request-1";
pub const TEST_SOURCE_IP: &str = "203.0.113.7";
pub const TEST_USER_AGENT: &str = "curl/8.5.0";

/// Create an API Gateway request with a full request context and an optional body
pub fn apigw_request(body: Option<&str>) -> ApiGatewayProxyRequest {
    let mut request: ApiGatewayProxyRequest = bare_apigw_request(body);

    request.request_context.request_id = Some(TEST_REQUEST_ID.to_string());
    request.request_context.identity.source_ip = Some(TEST_SOURCE_IP.to_string());
    request.request_context.identity.user_agent = Some(TEST_USER_AGENT.to_string());

    request
}

/// Create an API Gateway request with no request context
pub fn bare_apigw_request(body: Option<&str>) -> ApiGatewayProxyRequest {
    let mut request: ApiGatewayProxyRequest = ApiGatewayProxyRequest::default();

    request.body = body.map(str::to_string);

    request
}

/// A mock DynamoDB client where every put succeeds
pub fn create_mock_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .sequence()
        .output(|| PutItemOutput::builder().build())
        .repeatedly()
        .build();

    mock_client!(aws_sdk_dynamodb, [&put_item_rule])
}

/// A mock DynamoDB client where every put fails as if the table didn't exist
pub fn create_failing_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .sequence()
        .error(|| {
            PutItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        })
        .repeatedly()
        .build();

    mock_client!(aws_sdk_dynamodb, [&put_item_rule])
}

/// A store which rejects every write, counting the attempts.
#[derive(Clone, Default)]
pub struct FailingItemStore {
    attempts: Arc<Mutex<usize>>,
}

impl FailingItemStore {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ItemStore for FailingItemStore {
    fn table_name(&self) -> &str {
        TEST_TABLE
    }

    async fn put_item(&self, item: &MovieItem) -> Result<(), StoreError> {
        *self.attempts.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        Err(StoreError::new(
            TEST_TABLE,
            &item.id,
            BackendFailure("table unavailable".into()),
        ))
    }
}

/// A single event recorded by `LogCapture`.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Collects tracing events emitted on the current thread while installed.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    /// Route this thread's events to the capture until the guard is dropped.
    /// `#[tokio::test]` runs on the current thread, so async code is covered.
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }

    pub fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.events()
            .into_iter()
            .find(|event| event.message == message)
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor: FieldVisitor = FieldVisitor::default();
        event.record(&mut visitor);

        let message: String = visitor.fields.remove("message").unwrap_or_default();

        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *event.metadata().level(),
                message,
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{value:?}"));
    }
}
