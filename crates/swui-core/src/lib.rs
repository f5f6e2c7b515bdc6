//! Core library for `swui`.
//!
//! Holds the Swagger UI configuration model, the option builders that shape
//! it, the spec normaliser, and the fixed-slot template renderer that turns a
//! configuration into the two dynamic files of the UI bundle. This crate
//! knows nothing about HTTP; `swui-server` wires it into an Axum router.

pub mod config;
pub mod error;
pub mod options;
pub mod spec;
pub mod template;
