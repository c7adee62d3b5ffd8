//! # stdfn-core — Validated Functions over a Standard Schema Contract
//!
//! Turns any schema implementing [`Schema`] plus an implementation
//! function into a [`ValidatedFn`]: a callable that validates raw input
//! before delegating, and fails with a structured error otherwise.
//!
//! ## Key Types
//!
//! - [`Schema`] — the one capability a schema provider implements.
//!   Returns an [`Outcome`]: `Valid`, `Invalid` or `Deferred`.
//! - [`Issue`] / [`Issues`] — a failure descriptor and the ordered,
//!   non-empty sequence of them a failed validation carries.
//! - [`make_function`] / [`ValidatedFn`] — the factory and its product.
//! - [`InvalidParametersError`] / [`CallError`] — what a call returns on
//!   failure, discriminated by [`ErrorKind`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `stdfn-*` crates (this is the leaf of the DAG).
//! - No logging, no retries, no caching. Every call is independent.
//! - Deferred outcomes are rejected, never awaited.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod function;
pub mod issue;
pub mod schema;

pub use error::{
    CallError, ErrorKind, InvalidParametersError, INVALID_PARAMETERS_PREFIX,
    UNSUPPORTED_ASYNC_MESSAGE,
};
pub use function::{make_function, ValidatedFn};
pub use issue::{Issue, Issues, PathSegment};
pub use schema::{Deferred, Outcome, Schema, CONTRACT_VERSION};
