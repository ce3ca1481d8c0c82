//! End-to-end tests for the color2gray crates.
//!
//! Fixtures are encoded with `c2g-io` into a temporary directory, converted
//! with [`c2g_ops::Pipeline::run`], and decoded again for inspection.
