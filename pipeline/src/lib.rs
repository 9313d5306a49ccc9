//! Horoscope generation pipeline
//!
//! Five-stage flow behind a single driver: validate input, enrich with
//! astrological attributes, fan out one generation request per document
//! section, and merge the results as they complete. The Gemini transport
//! lives in `services`; everything else is pure logic over the shared
//! state value.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

pub use crate::core::{
    Pipeline, astrological_number, enrich_state, generate_outputs, generate_section,
    validate_input, zodiac_sign,
};
pub use error::{GenerationFailure, GenerationResult};
pub use services::GeminiGenerator;
pub use traits::*;
pub use types::{Generation, RetryPolicy};
