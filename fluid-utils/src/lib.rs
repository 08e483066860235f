//! Mapping helpers shared across Fluid components.
//!
//! This crate provides small, pure functions over in-memory maps and sets:
//! - [`contains_all`] — membership test for a list of keys
//! - [`union_maps_with_override`] — right-biased union of two string maps
//! - [`intersect_integer_sets`] — intersection of two integer sets
//! - [`ordered_keys`] — keys sorted into a deterministic order
//! - [`key_matched`] / [`key_value_matched`] — single key and key/value lookups
//!
//! [`LabelSelector`] builds on them to match label sets against
//! `key=value` requirements.
//!
//! Absent containers are passed as `None` and treated as empty.

mod error;
mod map;
mod selector;

pub use error::{Error, Result};
pub use map::{
    IntSet, StringMap, contains_all, intersect_integer_sets, key_matched, key_value_matched,
    ordered_keys, union_maps_with_override,
};
pub use selector::LabelSelector;
