mod action;
mod backend;
mod command;
mod editor;
mod event;
mod highlighter;
mod notification;
mod session;
mod status;
mod theme;
mod view;

pub use action::*;
pub use backend::*;
pub use command::*;
pub use editor::*;
pub use event::*;
pub use highlighter::*;
pub use notification::*;
pub use session::*;
pub use status::*;
pub use theme::*;
pub use view::*;
