//! Form-based front-ends.
//!
//! - [`direct`]: calls the prediction service in-process
//! - [`proxy`]: calls the REST API over HTTP

pub mod direct;
pub mod page;
pub mod proxy;

pub use direct::direct_ui_router;
pub use proxy::{proxy_ui_router, PredictClient, ProxyError};
