use anyhow::Result;

use crate::api;
use crate::core::WorkerConfig;

pub async fn run(host: String, port: String, config: WorkerConfig) -> Result<()> {
    api::serve(host, port, config).await
}
