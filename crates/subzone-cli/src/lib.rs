//! # subzone-cli
//!
//! Operator front end for subzone.
//!
//! ## Commands
//!
//! - **submit**: validate and record one identity's host list
//! - **zone**: compile the record store into a zone (stdout or in place)
//! - **pass**: print the credential for an identity
//! - **mail**: send an identity its credential through the local MTA
//! - **config**: inspect the configuration in use

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
