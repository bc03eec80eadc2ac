use aws_lambda_events::apigw::ApiGatewayProxyRequest;

const MISSING_VALUE: &str = "unknown";

/// Fields attached to every log event for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLogContext {
    pub request_id: String,
    pub source_ip: String,
    pub user_agent: String,
    pub table_name: String,
}

impl RequestLogContext {
    pub fn new(request: &ApiGatewayProxyRequest, table_name: &str) -> Self {
        let identity = &request.request_context.identity;

        RequestLogContext {
            request_id: or_unknown(request.request_context.request_id.as_deref()),
            source_ip: or_unknown(identity.source_ip.as_deref()),
            user_agent: or_unknown(identity.user_agent.as_deref()),
            table_name: table_name.to_string(),
        }
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(MISSING_VALUE).to_string()
}

/// Emit a tracing event carrying every field of a `RequestLogContext`.
///
/// ```ignore
/// log_event!(info, ctx, item_id = %item.id, "Processing payload");
/// ```
macro_rules! log_event {
    ($level:ident, $ctx:ident, $($rest:tt)+) => {
        lambda_runtime::tracing::$level!(
            request_id = %$ctx.request_id,
            source_ip = %$ctx.source_ip,
            user_agent = %$ctx.user_agent,
            table_name = %$ctx.table_name,
            $($rest)+
        )
    };
}

pub(crate) use log_event;

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{apigw_request, bare_apigw_request, TEST_REQUEST_ID, TEST_SOURCE_IP, TEST_TABLE, TEST_USER_AGENT};

    #[test]
    fn context_reads_request_identity() {
        let ctx: RequestLogContext = RequestLogContext::new(&apigw_request(None), TEST_TABLE);

        assert_eq!(
            RequestLogContext {
                request_id: TEST_REQUEST_ID.to_string(),
                source_ip: TEST_SOURCE_IP.to_string(),
                user_agent: TEST_USER_AGENT.to_string(),
                table_name: TEST_TABLE.to_string(),
            },
            ctx
        );
    }

    #[test]
    fn context_defaults_missing_values() {
        let ctx: RequestLogContext = RequestLogContext::new(&bare_apigw_request(None), TEST_TABLE);

        assert_eq!(MISSING_VALUE, ctx.request_id);
        assert_eq!(MISSING_VALUE, ctx.source_ip);
        assert_eq!(MISSING_VALUE, ctx.user_agent);
        assert_eq!(TEST_TABLE, ctx.table_name);
    }
}
