mod assistant;
mod message;

pub use assistant::*;
pub use message::*;
