//! Bind environment variables into typed configuration structs
//!
//! `envbind` fills a struct from environment variables, using a declarative
//! tag on each field to choose the variable and whether it is required.
//!
//! # Features
//!
//! - **Declarative**: field registration with `#[derive(EnvBind)]`
//! - **Tags**: `#[env = "NAME,omitempty"]`, in the familiar `NAME[,option...]` form
//! - **Derived names**: untagged fields read `FIELD_NAME` (`SubStrField` reads `SUB_STR_FIELD`)
//! - **Nesting**: nested structs are walked recursively, `#[env(flatten)]` promotes their fields
//! - **File-based secrets**: the `file` option falls back to `{KEY}_FILE`
//! - **Manifest**: [`describe`] lists every variable a struct reads
//!
//! # Supported Types
//!
//! | Kind | Rust type |
//! |---|---|
//! | bool | `bool` (`1 t T TRUE true True`, `0 f F FALSE false False`) |
//! | string | `String` |
//! | int, int8..int64 | `isize`, `i8`..`i64` |
//! | uint, uint8..uint64 | `usize`, `u8`..`u64` |
//! | float32, float64 | `f32`, `f64` |
//! | complex64, complex128 | `Complex32`, `Complex64` (`re`, `imi`, `re+imi`) |
//!
//! Pointer, optional and collection fields (`Box<T>`, `Option<T>`, `Vec<T>`,
//! maps, arrays) are accepted by the derive but fail the walk with
//! [`EnvError::UnsupportedKind`].
//!
//! # Example
//!
//! ```rust
//! use envbind::EnvBind;
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Config {
//!     #[env = "BOOL_FIELD"]
//!     pub bool_field: bool,
//!
//!     #[env = "STR_FIELD"]
//!     pub str_field: String,
//!
//!     // Reads MAX_CONNECTIONS; an unset variable is an error
//!     pub max_connections: u32,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("BOOL_FIELD", "true");
//! #     std::env::set_var("STR_FIELD", "strFieldValue");
//! #     std::env::set_var("MAX_CONNECTIONS", "10");
//! let mut config = Config::default();
//! envbind::parse(&mut config)?;
//! assert!(config.bool_field);
//! assert_eq!(config.str_field, "strFieldValue");
//! assert_eq!(config.max_connections, 10);
//! #     Ok(())
//! # }
//! ```
//!
//! # Tags
//!
//! ## `#[env = "NAME"]`
//!
//! Read the field from `NAME` (upper-cased) instead of the derived name.
//!
//! ## `#[env = "NAME,omitempty"]`
//!
//! The variable may be unset. An unset variable is coerced from the empty
//! string, which succeeds for `String` fields and fails for every other kind.
//! The name may be left empty (`#[env = ",omitempty"]`) to keep the derived
//! name.
//!
//! ## `#[env = "NAME,file"]`
//!
//! When `NAME` is unset, read the path in `NAME_FILE` and use the file's
//! trimmed contents (Kubernetes and Docker secrets).
//!
//! ```rust
//! # use envbind::EnvBind;
//! #[derive(Default, EnvBind)]
//! pub struct Config {
//!     // Reads API_KEY or the file named by API_KEY_FILE
//!     #[env = "API_KEY,file"]
//!     pub api_key: String,
//! }
//! ```
//!
//! ## `#[env(flatten)]`
//!
//! Promote the fields of a nested struct to this level. Nested structs are
//! walked either way; flattening only changes how the fields are registered.
//!
//! ```rust
//! # use envbind::EnvBind;
//! #[derive(Default, EnvBind)]
//! struct Database {
//!     #[env = "DB_HOST"]
//!     host: String,
//! }
//!
//! #[derive(Default, EnvBind)]
//! struct Config {
//!     #[env(flatten)]
//!     database: Database,
//! }
//! ```

pub mod coerce;
mod error;
pub mod kind;
mod lookup;
pub mod name;
pub mod tag;
mod walk;

pub use envbind_derive::EnvBind;
pub use error::{CoerceError, EnvError};
pub use kind::{EnvField, FieldRef, Kind};
pub use lookup::{Lookup, ProcessEnv};
pub use walk::{
    describe, from_env, parse, parse_field, parse_with, EnvStruct, Field, VarSpec, FILE, OMITEMPTY,
};

pub use num_complex::{Complex32, Complex64};
