//! Redaction data models

pub mod category;
pub mod entity;
pub mod level;
pub mod pii_token;

pub use category::PiiCategory;
pub use entity::PiiEntity;
pub use level::RedactionLevel;
pub use pii_token::{DetectionMethod, PiiToken, Span};
