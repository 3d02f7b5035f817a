//! HTTP request handlers

pub mod health;
pub mod products;
pub mod export;
