pub mod events;
pub mod tally;
pub mod voter;

pub use events::*;
pub use tally::*;
pub use voter::*;
