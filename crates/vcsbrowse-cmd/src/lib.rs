//! Command implementations for vcsbrowse.
//!
//! Each module corresponds to one subcommand; [`global::GlobalArgs`] holds
//! the flags they share.

pub mod auto;
pub mod blame;
pub mod commit;
pub mod diff;
pub mod factory;
pub mod file;
pub mod global;
pub mod log;
pub mod pull_request;
pub mod root;

#[cfg(test)]
pub mod test_helpers;
