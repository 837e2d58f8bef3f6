//! SQLite-backed session cache for the Weatherly forecast engine.
//!
//! [`SessionStore`] implements [`SessionCache`](weatherly_core::SessionCache)
//! on a single `session_cache` table. Each store is one session: opening it
//! discards entries left by an earlier process, and [`SessionStore::end`]
//! deletes the database file. Nothing survives across sessions.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use weatherly_core::WeatherEngine;
//! use weatherly_store::SessionStore;
//!
//! let store = Arc::new(SessionStore::open_in_memory()?);
//! let engine = WeatherEngine::builder().cache(store).no_latency().build();
//! # drop(engine);
//! # Ok::<(), weatherly_store::Error>(())
//! ```

mod error;
mod schema;
mod store;

pub use error::{Error, Result};
pub use store::SessionStore;
