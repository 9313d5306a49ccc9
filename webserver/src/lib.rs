//! Webserver library for the AI horoscope service
//!
//! This library provides the HTTP boundary of the horoscope generator: it
//! validates access codes, drives the generation pipeline, renders the result
//! to HTML, converts it to PDF and stores the artifacts.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use config::Settings;
pub use error::{WebServerError, WebServerResult};
pub use types::*;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{DocumentStore, PdfRenderer, TemplateRenderer};

// Re-export service implementations
pub use services::{FileStore, GotenbergClient, HandlebarsRenderer};
