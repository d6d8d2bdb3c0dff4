mod code_highlight;
mod controller;
mod debounce;
mod event_bridge;
pub mod events;
mod facade;
mod outline;
mod preview;
mod reconciler;
mod router;
mod status_line;

#[cfg(test)]
#[path = "mocks_test.rs"]
pub mod mocks;

pub use code_highlight::*;
pub use controller::*;
pub use debounce::*;
pub use event_bridge::*;
pub use facade::*;
pub use outline::*;
pub use preview::*;
pub use reconciler::*;
pub use router::*;
pub use status_line::*;
