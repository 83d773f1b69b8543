//! Common library for the Screenlark backend
//!
//! This crate provides shared infrastructure used by the API service:
//! environment-based settings, the TMDB upstream client, and the error
//! types for upstream failures.

pub mod config;
pub mod error;
pub mod tmdb;
