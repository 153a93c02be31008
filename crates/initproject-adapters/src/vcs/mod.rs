//! Version control adapters.

mod git;
mod fixed;

pub use fixed::StaticVcs;
pub use git::GitVcs;
