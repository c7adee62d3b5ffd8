//! # stdfn-schema — Schema Providers
//!
//! Concrete implementations of the `stdfn_core::Schema` contract.
//!
//! - [`value`] — composable schemas over `serde_json::Value`: primitives,
//!   objects, arrays, optional fields with defaults, nullability, length
//!   checks, and synchronous or deferred transforms.
//! - [`json_schema`] — [`JsonSchema`], a compiled JSON Schema document.
//! - [`typed`] — [`Typed`], deserializing a schema's parsed JSON value
//!   into a Rust type with serde.
//! - [`todo`] — the task schema used by the `stdfn todo` command.
//! - [`document`] — JSON/YAML document loading shared by the above and
//!   the CLI.
//!
//! ## Crate Policy
//!
//! - Depends only on `stdfn-core` internally.
//! - Validation failures are issues inside an `Outcome`, never errors.
//!   [`SchemaError`] covers building schemas and loading documents only.

pub mod document;
pub mod error;
pub mod json_schema;
pub mod todo;
pub mod typed;
pub mod value;

pub use document::{load_document, parse_document, DocumentFormat};
pub use error::SchemaError;
pub use json_schema::JsonSchema;
pub use todo::{todo_schema, todo_value_schema, Todo};
pub use typed::Typed;
pub use value::{BoxedSchema, ValueSchema};
