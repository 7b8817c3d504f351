//! Utility functions and helpers.

pub mod xss;

pub use xss::filter_xss;
