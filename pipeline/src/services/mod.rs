//! Pipeline service implementations

pub mod gemini;

#[cfg(test)]
pub mod tests;

pub use gemini::*;
