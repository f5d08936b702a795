//! Caller-owned font registry and Parley-backed shaping.

pub mod service;
