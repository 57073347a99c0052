//! Shopfront Library
//!
//! Exposes the storefront modules for the binary and for integration tests.

pub mod app;
pub mod cart;
pub mod cli;
pub mod data;
pub mod filter;
pub mod loader;
pub mod store;
pub mod ui;
