mod command;
mod event;
mod info;
mod session;

pub use command::*;
pub use event::*;
pub use info::*;
pub use session::*;
