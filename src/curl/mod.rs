//! curl command-line semantics
//!
//! [`resolve`] maps shell tokens to curl's options, [`build`] turns the
//! options into a [`Request`](crate::request::Request), and [`classify`]
//! decides what kind of body the data and form flags describe.

pub mod body;
pub mod builder;
pub mod opts;
pub mod resolve;

pub use body::{classify, curl_escape, DataArg, FormArg};
pub use builder::build;
pub use opts::{DataKind, Flag};
pub use resolve::{resolve, CurlOpt};
