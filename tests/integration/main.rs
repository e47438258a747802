//! Integration tests for the crawler and archiver
//!
//! These tests use wiremock to create mock HTTP servers and drive the
//! fetch, plan, walk and archive stages end-to-end.

mod crawl_tests;
mod fetch_tests;
mod support;
