mod api;
mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;
mod sysinfo;

use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Fails fast if an existing document is malformed; first run creates
    // empty defaults
    let store = store::Store::open(&cfg.storage.dir)?;

    let listener = server::create_listener(addr)?;

    if cfg.api.expose_environment {
        logger::log_environment_exposed();
    }
    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, store));
    server::run(listener, state).await;

    Ok(())
}
