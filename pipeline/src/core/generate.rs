//! Per-section content generation with retry

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use shared::SectionResult;

use crate::error::GenerationFailure;
use crate::traits::TextGenerator;
use crate::types::RetryPolicy;

/// Message attached to a section when the upstream service stays
/// unavailable through the whole retry budget.
const GENERATION_FAILED_MSG: &str = "Nepodařilo se vygenerovat odpověď.";

/// Backoff before the next attempt, doubling from one second. The exponent
/// is capped so an oversized configured retry count cannot overflow the
/// shift.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt.min(12))
}

/// Generate one section, retrying transient upstream failures.
///
/// Never fails out of the task: exhausting the retry budget or hitting a
/// permanent failure produces a `SectionResult` carrying the error text
/// instead. The caller attaches the display title; `title` comes back
/// empty here.
pub async fn generate_section<G: TextGenerator>(
    generator: &G,
    key: &str,
    user_prompt: &str,
    retry: RetryPolicy,
) -> SectionResult {
    let started = Instant::now();
    debug!("Running generation for '{}'", key);

    let mut outcome = failed_section(key, GENERATION_FAILED_MSG.to_string());

    for attempt in 0..retry.max_attempts {
        match generator.generate(user_prompt).await {
            Ok(generation) => {
                outcome = SectionResult {
                    key: key.to_string(),
                    title: String::new(),
                    content: generation.text,
                    error: None,
                    input_tokens: generation.input_tokens,
                    output_tokens: generation.output_tokens,
                };
                break;
            }
            Err(failure) if failure.is_retryable() && attempt + 1 < retry.max_attempts => {
                let delay = backoff_delay(attempt);
                warn!(
                    "⏳ Generation for '{}' hit {} (attempt {}), retrying in {}s",
                    key,
                    failure,
                    attempt + 1,
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
            Err(failure) => {
                // a transient failure on the last attempt means the budget
                // ran out; permanent failures keep their own message
                let message = if failure.is_retryable() {
                    GENERATION_FAILED_MSG.to_string()
                } else {
                    failure.to_string()
                };
                outcome = failed_section(key, message);
                break;
            }
        }
    }

    debug!(
        "Generation for '{}' ended, it took {:?}",
        key,
        started.elapsed()
    );
    outcome
}

fn failed_section(key: &str, message: String) -> SectionResult {
    SectionResult {
        key: key.to_string(),
        error: Some(message),
        ..SectionResult::default()
    }
}
