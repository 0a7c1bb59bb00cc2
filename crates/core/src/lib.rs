//! Domain logic for the movies service.
//!
//! Everything in this crate is free of I/O: the store, the HTTP surface and
//! the metadata provider live in sibling crates and call into these modules.

pub mod comments;
pub mod date_window;
pub mod error;
pub mod movies;
pub mod ordering;
pub mod pagination;
pub mod ranking;
pub mod types;
pub mod validation;
