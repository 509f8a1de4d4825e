//! External system integrations for cvscrub.
//!
//! - [`llm`] - Semantic oracle: the capability trait, an OpenAI / Azure
//!   OpenAI chat-completions client and a static oracle
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind narrow traits so the core
//! can be tested with in-process implementations.
//!
//! ```rust,no_run
//! use cvscrub::adapters::llm::{ChatCompletionsOracle, Oracle};
//! use cvscrub::config::{secret_string, OracleConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OracleConfig {
//!     api_key: Some(secret_string("sk-...".to_string())),
//!     ..Default::default()
//! };
//!
//! let oracle = ChatCompletionsOracle::new(config)?;
//! println!("Using {}", oracle.name());
//! # Ok(())
//! # }
//! ```

pub mod llm;
