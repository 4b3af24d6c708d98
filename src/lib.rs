//! curlgen library interface
//!
//! Converts curl command lines into equivalent HTTP client code.
//!
//! # Module Organization
//!
//! - [`shell`] - Shell tokenizer (quotes, escapes, variable references)
//! - [`curl`] - curl flag resolution, request building, body classification
//! - [`request`] - Request IR shared by every renderer
//! - [`codegen`] - One renderer per target style
//! - [`errors`] - Error types (CurlgenError, Result)
//! - [`core`] - CLI execution logic
//!
//! ```
//! use curlgen::{convert, TargetStyle};
//!
//! let conversion = convert("curl -u user:pass https://example.com", TargetStyle::Python).unwrap();
//! assert!(conversion.source.source.contains("auth=('user', 'pass')"));
//! ```

pub mod cli;
pub mod codegen;
pub mod config;
pub mod convert;
pub mod core;
pub mod curl;
pub mod errors;
pub mod http;
pub mod logging;
pub mod request;
pub mod shell;
pub mod status;
pub mod warnings;

pub use codegen::{render, RenderedSource, Renderer, TargetStyle};
pub use convert::{convert, parse, Conversion};
pub use errors::{CurlgenError, Result};
pub use request::Request;
pub use warnings::{Warning, Warnings};
