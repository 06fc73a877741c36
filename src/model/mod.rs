pub mod vote;
pub mod voter;
