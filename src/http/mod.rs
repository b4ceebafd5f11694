//! HTTP request headers and transport.
mod headers;
mod transport;


pub use headers::HeaderSet;
pub use transport::{GetRequest, HttpReply, ReqwestTransport, Transport};
