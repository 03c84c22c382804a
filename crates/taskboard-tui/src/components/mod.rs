pub mod panel;
pub mod popup;

pub use panel::*;
pub use popup::*;
