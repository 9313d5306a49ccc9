//! Pipeline driver and section fan-out
//!
//! The topology is fixed: validate, enrich, then one parallel fan-out over
//! the variant's sections with a sequential merge. State flows through by
//! value, so a single driver instance can serve any number of concurrent
//! runs.

use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use shared::{BASE_PROMPT_TEMPLATE, HoroscopeVariant, PipelineState, czech_name, sections_for};

use crate::core::enrich::enrich_state;
use crate::core::generate::generate_section;
use crate::core::validate::validate_input;
use crate::traits::TextGenerator;
use crate::types::RetryPolicy;

/// Message for a variant with no sections in the catalog.
const UNKNOWN_VARIANT_MSG: &str = "Neznámý typ horoskopu.";

/// Render the shared prompt prefix for one run by plain substitution.
fn render_base_prompt(state: &PipelineState) -> String {
    let zodiac = state.zodiac.map(czech_name).unwrap_or("Unknown");
    let astro_number = state
        .astro_number
        .map(|n| n.to_string())
        .unwrap_or_default();

    BASE_PROMPT_TEMPLATE
        .replace("{name}", &state.name)
        .replace("{dob}", &state.dob)
        .replace("{astro_number}", &astro_number)
        .replace("{zodiac}", zodiac)
}

/// Fan out one generation task per section and merge results as they
/// complete.
///
/// All tasks share the generator and its connection pool. Failed sections
/// are dropped from the output; their messages aggregate into
/// `state.error`, newline separated. Token totals count successful
/// sections only, and `sections` keeps completion order.
pub async fn generate_outputs<G: TextGenerator>(
    generator: &G,
    retry: RetryPolicy,
    mut state: PipelineState,
) -> PipelineState {
    let sections = sections_for(state.variant);
    if sections.is_empty() {
        state.error = Some(UNKNOWN_VARIANT_MSG.to_string());
        return state;
    }

    let base_prompt = render_base_prompt(&state);
    debug!("Fanning out {} generation tasks", sections.len());

    let mut tasks = FuturesUnordered::new();
    for section in sections {
        let full_prompt = format!("{} {}", base_prompt, section.prompt);
        tasks.push(async move {
            let result = generate_section(generator, section.key, &full_prompt, retry).await;
            (section, result)
        });
    }

    while let Some((section, mut result)) = tasks.next().await {
        if let Some(failure) = result.error.take() {
            let error_msg = format!(
                "Error in generating response for key {}: {}",
                section.key, failure
            );
            match state.error.as_mut() {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(&error_msg);
                }
                None => state.error = Some(error_msg),
            }
            continue;
        }

        result.title = section.title.to_string();
        state.total_input_tokens += result.input_tokens;
        state.total_output_tokens += result.output_tokens;
        state.sections.push(result);
    }

    state
}

/// Compile-once pipeline over a text generation transport.
///
/// Holds the transport and retry policy only; every [`run`](Self::run)
/// threads a fresh state value through the stages.
pub struct Pipeline<G: TextGenerator> {
    generator: G,
    retry: RetryPolicy,
}

impl<G: TextGenerator> Pipeline<G> {
    pub fn new(generator: G, retry: RetryPolicy) -> Self {
        Self { generator, retry }
    }

    /// Run the full flow for one request and await every fanned-out call.
    ///
    /// A validation failure is terminal: enrichment and generation do not
    /// run and the state comes back with empty sections. Section-level
    /// failures never fail the run; they surface in `state.error` next to
    /// whatever sections succeeded.
    pub async fn run(&self, name: &str, dob: &str, variant: HoroscopeVariant) -> PipelineState {
        let state = validate_input(PipelineState::new(name, dob, variant));
        if state.error.is_some() {
            return state;
        }

        let state = enrich_state(state);
        generate_outputs(&self.generator, self.retry, state).await
    }
}
