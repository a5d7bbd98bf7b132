//! Recipe Finder: collects ingredients plus course and diet preferences, asks a
//! recipe backend for matching recipes, then asks it for the aggregate
//! nutrition of everything those recipes call for.

pub mod client;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod models;
pub mod render;
pub mod routes;
pub mod session;
