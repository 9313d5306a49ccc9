//! Shared domain model for the horoscope generation service
//!
//! Contains only truly shared pieces: the state types that flow through the
//! generation pipeline, the static prompt catalog, and tracing setup.
//! Component-internal types (request payloads, stored documents) are kept
//! in their respective components.

pub mod logging;
pub mod prompts;
pub mod types;

pub use prompts::{BASE_PROMPT_TEMPLATE, SYSTEM_PROMPT, SectionPrompt, sections_for};
pub use types::{HoroscopeVariant, PipelineState, SectionResult, ZodiacSign, czech_name};
