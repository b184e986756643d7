//! Features operations module
//!
//! Preview feature management for a subscription: list (all or per resource
//! provider namespace), get, and register.

mod client;

pub use client::FeaturesClient;

#[cfg(test)]
mod tests;
