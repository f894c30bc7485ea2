pub mod history;
pub mod reward;

pub use history::*;
pub use reward::*;
