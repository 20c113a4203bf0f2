//! The request primitive
//!
//! Everything the runner asserts about the backend goes through
//! [`ApiClient::execute`]: one request, one [`Outcome`].

mod check;
mod client;

pub use check::{Check, ErrorKind, Method, Outcome, Reply};
pub use client::ApiClient;
