//! HTTP adapter for the remote history gateway.

pub mod backend_client;

pub use backend_client::BackendClient;
