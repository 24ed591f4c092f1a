//! Dependency graph engine and environment reduction.
//!
//! Everything under this module is pure computation: no process or
//! filesystem access happens here.

pub mod domain;
pub mod services;
