//! Event bus for queuing and dispatching events and commands.
//!
//! The [`EventBus`] collects events raised while an external event is handled
//! and the commands they translate into, so the session can process them in
//! FIFO order once the triggering call has finished mutating state.

use std::collections::VecDeque;

use super::types::{AppEvent, Command};

/// A simple event bus that queues events and commands for processing.
///
/// # Usage Pattern
///
/// ```ignore
/// bus.emit(AppEvent::BoundsChanged);
///
/// for event in bus.take_events() {
///     if let AppEvent::BoundsChanged = event {
///         bus.dispatch(Command::RecomputeLiquidity);
///     }
/// }
///
/// for cmd in bus.take_commands() {
///     session.execute(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct EventBus {
    /// Queue of pending application events.
    events: VecDeque<AppEvent>,
    /// Queue of pending commands.
    commands: VecDeque<Command>,
}

impl EventBus {
    /// Create a new empty event bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an application event to be processed.
    pub fn emit(&mut self, event: AppEvent) {
        self.events.push_back(event);
    }

    /// Dispatch a command to be executed.
    ///
    /// Identical commands already waiting in the queue are not queued twice.
    pub fn dispatch(&mut self, cmd: Command) {
        if !self.commands.contains(&cmd) {
            self.commands.push_back(cmd);
        }
    }

    /// Dispatch multiple commands at once.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for cmd in commands {
            self.dispatch(cmd);
        }
    }

    /// Take all pending events, leaving the queue empty.
    #[must_use]
    pub fn take_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }

    /// Take all pending commands, leaving the queue empty.
    #[must_use]
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands).into_iter().collect()
    }

    /// Check if there are any pending events.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Check if there are any pending commands.
    #[must_use]
    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }
}
