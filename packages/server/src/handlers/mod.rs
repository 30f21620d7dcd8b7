pub mod item;
pub mod result;
pub mod topic;
pub mod vote;
