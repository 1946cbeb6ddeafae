pub mod toggle;

pub use toggle::{ToggleOutcome, Transition, clean_line, toggle_line};
