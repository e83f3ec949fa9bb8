//! Pokebattle HTTP server
//!
//! Exposes the battle engine and query façade over HTTP/1.1 with JSON bodies:
//! - `POST /pokemon/battle` triggers a battle
//! - `GET /pokemon` lists the creature catalog
//! - `GET /pokemon/battles` lists past battles, optionally by day range
//! - `GET /pokemon/scores` returns the leaderboard
//!
//! The creature catalog is PokeAPI, optionally behind an in-memory cache.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod handler;
pub mod router;
pub mod server;

#[cfg(test)]
mod test_support;

pub use cache::{CacheStats, CachedCatalog};
pub use catalog::PokeApiCatalog;
pub use config::{CacheConfig, CatalogConfig, Config, ConfigError};
pub use handler::{dispatch, handle_request, status_for, App, BattleRequest};
pub use router::{Route, RouteMatch, Router};
pub use server::serve;
