use crate::core::WorkerConfig;
use crate::emulator::Emulator;

pub struct AppState {
    pub emulator: Emulator,
    pub config: WorkerConfig,
}

impl AppState {
    pub fn new(emulator: Emulator) -> Self {
        let config = emulator.config().clone();
        Self { emulator, config }
    }
}
