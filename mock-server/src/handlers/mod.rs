//! One router per service. Each merges into the app router over the shared
//! `Db` state.

pub(crate) mod adoption;
pub(crate) mod animals;
pub(crate) mod auth;
pub(crate) mod cart;
pub(crate) mod catalog;
pub(crate) mod orders;

/// Case-insensitive containment used by the name searches.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
