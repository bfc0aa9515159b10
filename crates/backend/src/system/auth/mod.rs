pub mod extractor;
pub mod middleware;
pub mod provider;
pub mod service;
