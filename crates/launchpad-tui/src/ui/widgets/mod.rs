//! Reusable widgets for the launchpad TUI.

pub mod logo;
pub mod status_bar;
pub mod step_loader;
pub mod text_input;
pub mod transcript;

pub use logo::Logo;
pub use status_bar::{KeyHint, StatusBar};
pub use step_loader::StepLoader;
pub use text_input::TextInputState;
pub use transcript::Transcript;
