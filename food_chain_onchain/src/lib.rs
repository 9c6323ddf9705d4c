pub mod address_store;
pub mod artifact;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod flows;
pub mod verify;
