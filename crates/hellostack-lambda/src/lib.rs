// AWS Lambda runtime adapter for the hello handler
//
// Stateless: every invocation builds a fresh response from the clock.
// The event payload is decoded as serde_json::Value so no input shape,
// however malformed, can make the handler fail.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

mod response;

pub use response::{greeting_response, GreetingResponse, GREETING_MESSAGE};

async fn handle_request(event: LambdaEvent<Value>) -> Result<GreetingResponse, Error> {
    // Request content is ignored; the front door already limits the
    // surface to GET /.
    let (_payload, context) = event.into_parts();
    tracing::debug!(request_id = %context.request_id, "serving greeting");
    Ok(greeting_response(chrono::Utc::now()))
}

/// Lambda runtime entry point
pub async fn run() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .without_time() // CloudWatch stamps log lines itself
        .init();

    lambda_runtime::run(service_fn(handle_request)).await
}
