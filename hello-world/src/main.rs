//! Hello-world example function
//!
//! Receives a typed request, validates it and returns a greeting. The
//! request must carry a non-blank `name` field; anything else fails the
//! invocation with a message.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
struct Request {
    /// Who to greet; required, must not be blank
    name: String,
}

#[derive(Debug, Serialize)]
struct Response {
    message: String,
}

async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let name = event.payload.name.trim();
    if name.is_empty() {
        return Err("request field `name` must not be blank".into());
    }

    info!(name = %name, "Greeting requested");
    Ok(Response {
        message: format!("Hello, {name}!"),
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hello_world=info".parse().expect("valid directive")),
        )
        .with_target(false)
        .without_time()
        .init();

    run(service_fn(function_handler)).await
}
