use anyhow::Result;
use push_worker::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
