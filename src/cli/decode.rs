use std::path::PathBuf;

use anyhow::Result;
use tokio::io::AsyncReadExt;

use crate::core::WorkerConfig;
use crate::notify::{NotificationDescriptor, decode};

pub async fn run(file: Option<PathBuf>, no_vibrate: bool, config: WorkerConfig) -> Result<()> {
    let input = match file {
        Some(path) => tokio::fs::read(path).await?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            buf
        }
    };

    let config = WorkerConfig {
        vibration_supported: config.vibration_supported && !no_vibrate,
        ..config
    };
    let now = chrono::Utc::now().timestamp_millis();

    if let Some(descriptor) = decode_input(&input, now, &config) {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    }

    Ok(())
}

/// Empty input stands for a push without a payload. Failures are
/// logged and nothing is rendered, same as the push handler.
fn decode_input(input: &[u8], now: i64, config: &WorkerConfig) -> Option<NotificationDescriptor> {
    let payload = if input.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(input)
    };

    match decode(payload, now, config) {
        Ok(descriptor) => Some(descriptor),
        Err(e) => {
            tracing::error!("Error showing notification: {}", e);
            None
        }
    }
}
