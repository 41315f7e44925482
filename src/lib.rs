pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;

mod cli;
mod routes;
mod server;

pub use routes::receipt_router;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
