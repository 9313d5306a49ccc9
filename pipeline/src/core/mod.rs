//! Pipeline core business logic

pub mod driver;
pub mod enrich;
pub mod generate;
pub mod validate;

pub use driver::{Pipeline, generate_outputs};
pub use enrich::{astrological_number, enrich_state, zodiac_sign};
pub use generate::generate_section;
pub use validate::validate_input;
