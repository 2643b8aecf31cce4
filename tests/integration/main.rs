//! Integration test suite entry point.
