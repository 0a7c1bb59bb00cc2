//! Client for the OMDb movie-metadata provider.
//!
//! [`OmdbClient`] performs title lookups over HTTP. Callers depend on the
//! [`MovieLookup`] trait so tests can substitute a canned provider.
//! [`payload`] holds the provider's record schema and its shape validation.

pub mod client;
pub mod payload;

pub use client::{LookupResult, MovieLookup, OmdbClient, OmdbError};
pub use payload::{MoviePayload, PayloadError, RatingPayload};
