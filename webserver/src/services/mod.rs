//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod pdf;
pub mod store;
pub mod templates;

#[cfg(test)]
pub mod tests;

// Re-export service implementations
pub use pdf::GotenbergClient;
pub use store::FileStore;
pub use templates::HandlebarsRenderer;
