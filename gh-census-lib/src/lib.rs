#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for gh-census
//!
//! This library consolidates all functionality for the gh-census tool, which harvests
//! public GitHub profiles for a population of users selected by a search query and
//! answers a fixed set of analytical questions about them.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`harvest`]: Paginated, rate-limited collection from the GitHub REST API
//! - [`dataset`]: Normalized user and repository tables and their CSV form
//! - [`queries`]: The sixteen analytical questions
//! - [`reports`]: Console and JSON rendering of answers

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub(crate) type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub(crate) type HashSet<T> = rustc_hash::FxHashSet<T>;

pub(crate) fn hash_map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod dataset;
pub mod harvest;
pub mod queries;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
