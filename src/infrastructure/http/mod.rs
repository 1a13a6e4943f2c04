//! HTTP client implementations of [`crate::domain::transport::HttpTransport`].

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
