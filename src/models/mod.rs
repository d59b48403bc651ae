pub mod catalog;
pub mod finding;
pub mod progress;
pub mod project;

pub use catalog::*;
pub use finding::*;
pub use progress::*;
pub use project::*;
