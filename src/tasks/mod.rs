pub mod button;
pub mod display;

pub use button::{BUTTON_STATE, handle_button};
pub use display::{DisplayMode, LINK_STATE, Strips, display_task};
