pub mod connection;
pub mod migrations;
pub mod kv;

pub use connection::*;
pub use kv::*;
