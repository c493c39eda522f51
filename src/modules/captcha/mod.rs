//! CAPTCHA verification for ticket selection
//!
//! Verifies reCAPTCHA responses against Google's `siteverify` endpoint.

mod recaptcha_client;

pub use recaptcha_client::RecaptchaClient;
