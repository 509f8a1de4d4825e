//! PII finders
//!
//! The structured pass (pattern catalog plus phone numbers) is deterministic.
//! The semantic pass asks the oracle and re-locates what it reports.

pub mod patterns;
pub mod phone;
pub mod semantic;
pub mod structured;

pub use patterns::{CompiledPattern, PatternDefinition, PatternRegistry};
pub use phone::{PhoneNumberFinder, PhoneStrategy};
pub use semantic::{parse_entities, SemanticSpanFinder};
pub use structured::StructuredSpanFinder;
