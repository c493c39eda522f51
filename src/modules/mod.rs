//! Modules layer - Clients for external services
//!
//! Contains adapters for third-party integrations like CAPTCHA verification.

pub mod captcha;
