//! # Database module — PostgreSQL connection pool management
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so client (WASM) builds never
//! pull in SQLx or Tokio networking code.
//!
//! The pool is a lazy, process-wide singleton backed by a [`tokio::sync::OnceCell`].
//! The first call to [`get_pool`] reads [`crate::config::ServerConfig`], opens the
//! pool and caches it for all subsequent callers.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
