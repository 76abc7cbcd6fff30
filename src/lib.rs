//! KBT: Kart Build Toolkit
//!
//! A Unix-style toolkit for assembling go-kart builds from a plain-text
//! YAML catalog, with compatibility checking and performance estimation.

pub mod cli;
pub mod compat;
pub mod core;
pub mod entities;
pub mod perf;
pub mod schema;
