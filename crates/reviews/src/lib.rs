//! Reviews domain module: the review board.

pub mod board;
pub mod review;

pub use board::ReviewBoard;
pub use review::{NewReview, Review, ReviewId};
