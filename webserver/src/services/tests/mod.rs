//! Service tests for webserver
//!
//! This module contains tests for all webserver services.
