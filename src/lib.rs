//! Client-side state core for a streaming-preview browser.
//!
//! The crate keeps per-category rows, search, favourites, the detail modal and
//! the auth session in a single [`store::Store`]. Views read through memoized
//! [`store::selectors`], and all mutation flows through the closed
//! [`store::Action`] vocabulary. Network work lives in [`effects`], which talks
//! to the media metadata API through [`api::MediaApi`] and reports terminal
//! actions back over the store's channel.
//!
//! # Architecture
//!
//! - [`registry`] - static table of category rows (endpoint, title, key)
//! - [`store`] - actions, reducers, selectors and the root store
//! - [`effects`] - async orchestration (fetch, load-more, search)
//! - [`api`] - HTTP client and wire types for the media API
//! - [`view`] - plain-text rendering of rows for the CLI

pub mod api;
pub mod config;
pub mod effects;
pub mod registry;
pub mod store;
pub mod util;
pub mod view;
