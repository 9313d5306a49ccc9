//! Tests for pipeline services
