//! Shared utilities for the ad-targeting backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Validation helpers for coordinates, radii and timestamps

pub mod validation;
