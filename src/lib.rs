//! Transcript Polish - correction pipeline for dictated text
//!
//! Turns raw speech-recognizer output into polished text: built-in
//! phonetic corrections, user-trained dictionary substitutions, sentence
//! casing, and spoken-number normalization.

/// Configuration management
pub mod config;
/// Built-in rules and dictionary corrections
pub mod correction;
/// Persistent user correction dictionary
pub mod dictionary;
/// Spoken-number normalization
pub mod numbers;
/// End-to-end polishing pipeline
pub mod pipeline;
/// Telemetry and logging
pub mod telemetry;
