//! Shared helpers for the behaviour suites.
//!
//! `step` parses quoted step parameters and `tree` lays out temporary locale
//! directories with compiled catalogs.
pub mod step;
pub mod tree;
