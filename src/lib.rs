//! Backend for a household LIFX dashboard: a shared-password login kept in
//! cookies, a gate in front of the dashboard pages, and thin JSON passthroughs
//! to the LIFX cloud API.

pub mod api;
pub mod auth;
pub mod color;
pub mod context;
pub mod lifx;
pub mod pages;
pub mod protocols;
pub mod settings;
