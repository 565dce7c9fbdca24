// Utility functions

pub mod domain;
pub mod http;
pub mod logger;

pub use domain::*;
pub use http::*;
pub use logger::*;
