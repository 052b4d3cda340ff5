//! Core types and rules shared by the subzone crates.
//!
//! - **Types**: [`SubmissionEvent`] (one line of the record store),
//!   [`Submission`] and [`Receipt`]
//! - **Validation**: hostname, identity and host-list rules in [`validate`]
//! - **Errors**: [`SubzoneError`] and the crate [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use subzone_core::validate::{is_valid_hostname, validate_hosts};
//!
//! assert!(is_valid_hostname("example.com."));
//! let hosts = validate_hosts(&["a.example.com."]).unwrap();
//! assert_eq!(hosts, vec!["a.example.com"]);
//! ```

mod error;
pub mod types;
pub mod validate;

pub use error::{Result, SubzoneError};
pub use types::*;
