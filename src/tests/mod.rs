//! Test suite for the block chain model
//!
//! Unit tests live next to the code they cover; this module groups the
//! cross-module scenarios and property tests.

#[cfg(test)]
mod integration;
