pub mod ai;
pub mod cases;
pub mod catalog;
pub mod health;
pub mod projects;
pub mod reports;
