pub mod line;
pub mod settings;
pub mod status;

pub use line::*;
pub use settings::*;
pub use status::*;
