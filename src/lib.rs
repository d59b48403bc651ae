pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod cvss;
pub mod db;
pub mod errors;
pub mod llm;
pub mod models;
pub mod reporting;
