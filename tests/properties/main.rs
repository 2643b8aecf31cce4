//! Property test suite entry point.

mod ranking_props;
