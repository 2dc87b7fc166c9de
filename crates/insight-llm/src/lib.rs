//! Language model client layer for stock-insight
//!
//! The rest of the workspace talks to a hosted model through the
//! [`LLMProvider`] trait only. This crate provides:
//!
//! - Message and completion types
//! - The provider trait
//! - A retry policy for transient provider failures
//! - An OpenAI-compatible HTTP provider (behind the `openai` feature), which
//!   also serves Groq, LM Studio, vLLM and similar endpoints

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod retry;

pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use retry::RetryPolicy;

#[cfg(feature = "openai")]
pub mod providers;
