pub mod cli;
pub mod db;
pub mod edit;
pub mod error;
pub mod models;
pub mod output;
pub mod persistence;
pub mod session;
pub mod store;
pub mod view;
