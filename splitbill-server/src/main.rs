#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod cors;
mod error;
mod routes;

#[tokio::main]
async fn main() {
    bootstrap::run().await;
}
