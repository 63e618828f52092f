//! Mini panel - the bottom-of-screen strip of panel toggle buttons

mod actions;
mod layout;
mod plugin;
mod spawn;
mod state;

pub use actions::*;
pub use layout::*;
pub use plugin::*;
pub use spawn::*;
pub use state::*;
