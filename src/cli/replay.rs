use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::WorkerConfig;
use crate::emulator::Emulator;
use crate::worker::{Outcome, WorkerEvent};

pub async fn run(file: PathBuf, replacing: bool, config: WorkerConfig) -> Result<()> {
    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let emulator = if replacing {
        Emulator::replacing(config)
    } else {
        Emulator::new(config)
    };

    for outcome in replay(&emulator, &content).await? {
        println!("{}", serde_json::to_string(&outcome)?);
    }

    Ok(())
}

/// Parse every line as a `WorkerEvent` and dispatch them in order.
/// Blank lines and lines starting with `#` are skipped. A file that does
/// not parse runs nothing. An event that fails is logged and recorded as
/// a `failed` outcome, and the rest of the session still runs.
pub async fn replay(emulator: &Emulator, content: &str) -> Result<Vec<Outcome>> {
    let events = content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str::<WorkerEvent>(line)
                .with_context(|| format!("Invalid event on line {}", idx + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut outcomes = Vec::new();
    for event in events {
        let kind = event.kind();
        match emulator.dispatch(event).await {
            Ok(dispatch) => outcomes.extend(dispatch.outcomes),
            Err(e) => {
                tracing::error!("Error replaying {} event: {}", kind, e);
                outcomes.push(Outcome::failed(kind, e.to_string()));
            }
        }
    }
    Ok(outcomes)
}
