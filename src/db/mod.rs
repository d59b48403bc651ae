pub mod cases;
pub mod connection;
pub mod progress;
pub mod projects;
pub mod schema;

pub use connection::Database;
