/// Lifecycle of a checker with respect to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckerState {
    /// The file has no enclosing workspace.
    #[default]
    Disabled,
    /// A workspace exists; waiting for a check to be triggered.
    EnabledIdle,
    /// The build is running.
    Running,
    /// The build finished; its output is being turned into diagnostics.
    Reporting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckEvent {
    WorkspaceFound,
    WorkspaceLost,
    /// A check was requested; `has_targets` is whether any target owns the file.
    Triggered { has_targets: bool },
    ProcessFinished,
    ResultsDelivered,
}

impl CheckerState {
    /// Next state after `event`. Events that do not apply leave the state unchanged.
    #[must_use]
    pub const fn on(self, event: CheckEvent) -> Self {
        match (self, event) {
            (_, CheckEvent::WorkspaceLost) => Self::Disabled,
            (Self::Disabled, CheckEvent::WorkspaceFound)
            | (Self::EnabledIdle, CheckEvent::Triggered { has_targets: false })
            | (Self::Reporting, CheckEvent::ResultsDelivered) => Self::EnabledIdle,
            (Self::EnabledIdle, CheckEvent::Triggered { has_targets: true }) => Self::Running,
            (Self::Running, CheckEvent::ProcessFinished) => Self::Reporting,
            (state, _) => state,
        }
    }
}

/// Applies events to a state and logs each transition.
#[derive(Debug, Default)]
pub(crate) struct StateTracker {
    state: CheckerState,
}

impl StateTracker {
    pub(crate) fn apply(&mut self, event: CheckEvent) -> CheckerState {
        let next = self.state.on(event);
        tracing::trace!(from = ?self.state, to = ?next, ?event, "checker transition");
        self.state = next;
        next
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> CheckerState {
        self.state
    }
}
