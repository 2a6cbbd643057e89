//! Request invocation against the capture endpoint.
mod client;
mod execution;
mod invoker;


pub use client::build_client;
pub use invoker::{HttpInvoker, RequestInvoker};
