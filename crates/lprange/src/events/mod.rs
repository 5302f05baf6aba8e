//! Events flowing from the outside world into a session.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{AppEvent, Command, PointerEvent};
