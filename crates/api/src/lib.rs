//! HTTP API: staff and portal surfaces over the permission engine.
//!
//! The request-admission gate lives in [`authz`] and [`middleware`]; the
//! rendering gate in [`app::navigation`].

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
