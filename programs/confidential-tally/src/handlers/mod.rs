pub mod initialize;
pub use initialize::*;

pub mod vote;
pub use vote::*;

pub mod close_voting;
pub use close_voting::*;

pub mod publish_histogram;
pub use publish_histogram::*;

pub mod transfer_ownership;
pub use transfer_ownership::*;

pub mod views;
pub use views::*;
