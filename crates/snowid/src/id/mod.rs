mod error;
mod interface;
mod snowflake;
mod utils;

pub use error::*;
pub use interface::*;
pub use snowflake::*;
pub use utils::*;
