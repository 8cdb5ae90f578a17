//! Core types for vcsbrowse.
//!
//! This crate turns a hosted repository description into web page URLs:
//! - [`RemoteDescriptor`] and [`Provider`] describe where a repository lives
//! - [`PageRequest`] names the page a caller wants
//! - [`resolve`] applies the provider's URL templates and returns a [`WebUrl`]
//!
//! It also carries the shared plumbing of the CLI: [`IOStreams`], the
//! [`config::Config`] trait and the [`browser::Browser`] trait.

pub mod browser;
pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod iostreams;
pub mod page;
pub mod provider;
pub mod repo;
pub mod resolver;
#[cfg(test)]
pub mod test_utils;
pub mod weburl;

pub use errors::{ConfigError, UnsupportedOperation};
pub use iostreams::IOStreams;
pub use page::{FileTarget, LineRange, LineRangeError, PageKind, PageRequest, Permalink};
pub use provider::Provider;
pub use repo::{ParseError, RemoteDescriptor};
pub use resolver::{resolve, root_page};
pub use weburl::WebUrl;
