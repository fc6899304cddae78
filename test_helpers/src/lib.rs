//! Test helpers shared across crates.
//!
//! This crate provides a temporary directory fixture that lays out a base
//! document next to its optional patch, and a wrapper around
//! `figment::Jail` that reports failures through `anyhow`.

pub mod figment;
pub mod workspace;

pub use workspace::PatchWorkspace;
