mod config;
mod lock;
mod status;

pub use config::*;
pub use lock::*;
pub use status::*;
