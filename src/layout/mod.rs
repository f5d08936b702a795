//! Text wrapping and multi-line/unit placement.

pub mod engine;
