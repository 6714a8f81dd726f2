//! Modules layer - Infrastructure adapters
//!
//! Contains the persistence adapters behind the place store port.

pub mod storage;
