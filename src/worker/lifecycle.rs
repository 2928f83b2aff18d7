use serde::Serialize;

/// Where a worker is in the host's lifecycle. The worker never moves
/// itself between states, the host does in response to install and
/// activate completing.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    Redundant,
}

impl LifecycleState {
    pub fn can_install(self) -> bool {
        self == LifecycleState::Parsed
    }

    pub fn can_activate(self) -> bool {
        self == LifecycleState::Installed
    }

    /// State after the install handler settles. A failed install makes
    /// the worker redundant.
    pub fn installed(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (LifecycleState::Installing, true) => LifecycleState::Installed,
            (LifecycleState::Installing, false) => LifecycleState::Redundant,
            (state, _) => state,
        }
    }

    /// State after the activate handler settles. Activation goes ahead
    /// even when the handler failed.
    pub fn activated(self) -> Self {
        match self {
            LifecycleState::Activating => LifecycleState::Activated,
            state => state,
        }
    }
}
