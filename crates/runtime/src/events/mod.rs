//! Topic-based event routing from the session core to the presentation
//! layer.

mod bus;

pub use bus::{BusEvent, EventBus, Topic};
