// src/path/mod.rs

//! Rename-stable references to filesystem objects.

pub mod handle;
mod resolve;

pub use handle::PathHandle;
