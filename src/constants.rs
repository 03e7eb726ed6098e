//! Centralized string constants shared across the crate.

// Default request headers
pub const USER_AGENT: &str = "stencil/0.1.0";

// Content types
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
