//! Codecs for edits and patches.

pub mod json;
