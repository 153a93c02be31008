//! One module per action the command line can ask for.

pub mod list_types;
pub mod refresh;
