use crate::context::{log_event, RequestLogContext};
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use lambda_runtime::LambdaEvent;
use model::item::{MovieItem, MoviePayload};
use model::{Error, INSERTED_MESSAGE};
use std::sync::Arc;
use store::ItemStore;

pub mod config;
pub mod context;
pub mod error;

pub use config::{ConfigError, HandlerConfig};
pub use error::HandlerError;

/// Writes one movie record per API Gateway request.
///
/// A request with a JSON body `{"id", "year", "title"}` stores that record,
/// one without a body stores a placeholder record with a generated id.
///
/// ```ignore
/// let store = DynamoDbItemStore::new(dynamodb_client, config.table_name);
/// let handler = RequestHandler::new(Arc::new(store));
///
/// lambda_runtime::run(service_fn(async |event| handler.handle_event(event).await)).await
/// ```
#[derive(Clone)]
pub struct RequestHandler {
    store: Arc<dyn ItemStore>,
}

impl RequestHandler {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        RequestHandler { store }
    }

    /// Entry point for `lambda_runtime::run`.
    pub async fn handle_event(
        &self,
        event: LambdaEvent<ApiGatewayProxyRequest>,
    ) -> Result<ApiGatewayProxyResponse, Error> {
        Ok(self.handle(&event.payload).await?)
    }

    /// Store the record described by `request`.
    ///
    /// Failures are logged with the request context and returned unchanged,
    /// nothing is retried and no partial write is possible.
    pub async fn handle(
        &self,
        request: &ApiGatewayProxyRequest,
    ) -> Result<ApiGatewayProxyResponse, HandlerError> {
        let ctx: RequestLogContext = RequestLogContext::new(request, self.store.table_name());

        log_event!(info, ctx, "Request received");

        self.insert(request, &ctx).await.inspect_err(|err| {
            log_event!(error, ctx, error = %err, "Error processing request");
        })
    }

    async fn insert(
        &self,
        request: &ApiGatewayProxyRequest,
        ctx: &RequestLogContext,
    ) -> Result<ApiGatewayProxyResponse, HandlerError> {
        match read_body(request)? {
            Some(body) => {
                let payload: MoviePayload = serde_json::from_str(&body)?;
                let item: MovieItem = MovieItem::try_from(payload)?;

                log_event!(info, ctx, item_id = %item.id, "Processing payload");

                self.store.put_item(&item).await?;

                log_event!(info, ctx, item_id = %item.id, "Successfully inserted data");
            }
            None => {
                log_event!(info, ctx, "No payload provided, using default");

                let item: MovieItem = MovieItem::placeholder();

                self.store.put_item(&item).await?;

                log_event!(info, ctx, item_id = %item.id, "Successfully inserted default data");
            }
        }

        Ok(inserted_response())
    }
}

/// The request body, if present and non-empty, decoded from base64 when flagged.
fn read_body(request: &ApiGatewayProxyRequest) -> Result<Option<String>, HandlerError> {
    let Some(body) = request.body.as_deref().filter(|body| !body.is_empty()) else {
        return Ok(None);
    };

    if !request.is_base64_encoded {
        return Ok(Some(body.to_string()));
    }

    let bytes: Vec<u8> = STANDARD.decode(body)?;

    Ok(Some(String::from_utf8(bytes)?))
}

fn inserted_response() -> ApiGatewayProxyResponse {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let body: String = serde_json::json!({ "message": INSERTED_MESSAGE }).to_string();

    let mut response: ApiGatewayProxyResponse = ApiGatewayProxyResponse::default();
    response.status_code = 200;
    response.headers = headers;
    response.body = Some(Body::Text(body));

    response
}
