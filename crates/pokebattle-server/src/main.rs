//! Pokebattle server binary
//!
//! Usage: `pokebattle [config/server.ron]`
//!
//! `POKEBATTLE_LISTEN` and `POKEBATTLE_DATABASE` override the config file;
//! `RUST_LOG` controls log output (default `info`).

use log::info;
use pokebattle_core::Catalog;
use pokebattle_db::Store;
use pokebattle_server::{serve, App, CachedCatalog, Config, PokeApiCatalog};
use std::sync::Arc;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error>;

fn main() -> Result<(), BoxError> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/server.ron".to_string());

    info!("Loading configuration from: {}", config_path);
    let mut config = Config::load(&config_path)?;
    config.apply_env()?;

    let store = match &config.database {
        Some(path) => {
            info!("Opening database at {}", path);
            Store::open(path)?
        }
        None => {
            info!("Using in-memory database");
            Store::in_memory()?
        }
    };

    // The blocking catalog client has to exist outside the async runtime.
    let catalog = PokeApiCatalog::new(&config.catalog)?;
    info!("Catalog at {}", config.catalog.base_url);

    match config.cache.clone() {
        Some(cache) => {
            info!(
                "Catalog cache enabled ({} entries, {}s TTL)",
                cache.max_entries, cache.ttl_secs
            );
            run(&config, CachedCatalog::new(catalog, &cache), store)
        }
        None => run(&config, catalog, store),
    }
}

fn run<C: Catalog + 'static>(config: &Config, catalog: C, store: Store) -> Result<(), BoxError> {
    let addr = config.listen_addr()?;
    let app = Arc::new(App::new(catalog, store, config.battle.clone()));
    info!(
        "Battles draw {} creatures from index positions 0..={}",
        config.battle.sample_size, config.battle.draw_ceiling
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(addr).await?;
        serve(listener, app).await
    })?;
    Ok(())
}
