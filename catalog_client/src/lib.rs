//! HTTP client for the external lot catalog service.

pub mod config;
pub mod credential;
pub mod dto;
pub mod listings;
