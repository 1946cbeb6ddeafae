pub mod annotation;
pub mod classifier;

pub use classifier::{classify, split_leading_display_time};
