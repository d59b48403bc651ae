pub mod types;

pub use types::WstgkitError;
