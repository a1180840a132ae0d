//! Notes Service — standalone binary serving a JSON-file-backed notes API.
//!
//! Default: http://0.0.0.0:5000/

mod config;
mod error;
mod routes;
mod store;

use config::Config;
use routes::AppState;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Opening note collection at: {}", config.data_path.display());
    let store = match store::NoteStore::open(&config.data_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Failed to open note collection: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        store,
        index_path: config.index_path.clone(),
        start_time: Instant::now(),
    });

    let app = routes::router(state);

    let addr = config.bind_addr();
    log::info!("Notes Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
