//! Input validation stage

use chrono::NaiveDate;

use shared::PipelineState;

/// Date format the service accepts: day first, dot separated.
const DOB_FORMAT: &str = "%d.%m.%Y";

/// Check the user inputs and parse the date of birth.
///
/// On failure the state carries a user-facing Czech message and the driver
/// skips the remaining stages. Inputs themselves are left untouched;
/// parsing lands in `parsed_date`.
pub fn validate_input(mut state: PipelineState) -> PipelineState {
    if state.name.trim().is_empty() {
        state.error = Some("Neplatné jméno. Jméno nesmí být prázdné.".to_string());
        return state;
    }

    match NaiveDate::parse_from_str(state.dob.trim(), DOB_FORMAT) {
        Ok(date) => state.parsed_date = Some(date),
        Err(_) => {
            state.error =
                Some("Neplatný formát data narození. Použijte formát DD.MM.RRRR.".to_string());
        }
    }

    state
}
