//! Utility functions for aws-upload.

pub mod shell;

pub use shell::quote;
