use tracing::Subscriber;
use model::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_FILTER: &str = "info";

/// One flat JSON object per event, context fields next to `message`.
/// CloudWatch adds the ingestion time, so no timestamp is written.
fn json_subscriber<W>(writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// Install the JSON subscriber for the process, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() -> Result<(), Error> {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing::subscriber::set_global_default(json_subscriber(std::io::stdout, filter))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_handler;
    use handler::HandlerConfig;
    use serde_json::{Map, Value};
    use std::io::Write;
    use std::sync::{Arc, Mutex, PoisonError};
    use test_utils::{apigw_request, create_mock_dynamodb_client, TEST_REQUEST_ID, TEST_SOURCE_IP, TEST_TABLE, TEST_USER_AGENT};

    #[derive(Clone, Default)]
    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);

            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for BufferWriter {
        type Writer = BufferWriter;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    impl BufferWriter {
        fn lines(&self) -> Vec<Map<String, Value>> {
            let bytes: Vec<u8> = self.0.lock().unwrap_or_else(PoisonError::into_inner).clone();

            String::from_utf8(bytes)
                .expect("Log output should be UTF-8")
                .lines()
                .map(|line| match serde_json::from_str(line) {
                    Ok(Value::Object(object)) => object,
                    other => panic!("Expected a JSON object per line, got {other:?} from {line}"),
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn events_are_flat_json_lines() {
        let writer: BufferWriter = BufferWriter::default();
        let _guard = tracing::subscriber::set_default(json_subscriber(
            writer.clone(),
            EnvFilter::new(DEFAULT_FILTER),
        ));

        let handler = build_handler(
            create_mock_dynamodb_client(),
            HandlerConfig {
                table_name: TEST_TABLE.to_string(),
            },
        );

        handler
            .handle(&apigw_request(Some(r#"{"id":"42","year":2020,"title":"X"}"#)))
            .await
            .expect("Request should succeed");

        let lines: Vec<Map<String, Value>> = writer.lines();
        let received: &Map<String, Value> = lines
            .iter()
            .find(|line| line.get("message") == Some(&Value::from("Request received")))
            .expect("Request received should be logged");

        assert_eq!(Some(&Value::from("INFO")), received.get("level"));
        assert_eq!(Some(&Value::from(TEST_REQUEST_ID)), received.get("request_id"));
        assert_eq!(Some(&Value::from(TEST_SOURCE_IP)), received.get("source_ip"));
        assert_eq!(Some(&Value::from(TEST_USER_AGENT)), received.get("user_agent"));
        assert_eq!(Some(&Value::from(TEST_TABLE)), received.get("table_name"));
        assert!(received.get("fields").is_none());
        assert!(received.get("timestamp").is_none());

        let inserted: &Map<String, Value> = lines
            .iter()
            .find(|line| line.get("message") == Some(&Value::from("Successfully inserted data")))
            .expect("Success should be logged");

        assert_eq!(Some(&Value::from("42")), inserted.get("item_id"));
    }
}
