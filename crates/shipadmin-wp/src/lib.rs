//! Typed client for the WordPress REST API backing the shipping-record
//! admin: the standard `wp/v2/product` collection plus the custom
//! `shipping/v1/search` plugin endpoint. Also home to the payload assembler
//! that reconciles the legacy and canonical field-naming schemes.

mod client;
mod error;
pub mod payload;
pub mod types;

pub use client::{ListQuery, SearchFilters, WpClient, WpSettings};
pub use error::WpError;
