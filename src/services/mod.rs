pub mod error;
pub mod events;
pub mod fans;
pub mod fixtures;
pub mod news;
pub mod roster;
pub mod standings;
pub mod stats;

pub use error::*;
pub use standings::*;
pub use stats::*;
