//! ギャラリーAPIサーバー
//!
//! メディアサービスへの薄いプロキシ。認証情報はサーバー側だけが持つ。
//!
//! - `GET /images?max_results=&next_cursor=&search=` — 一覧（新しい順）
//! - `DELETE /images` 本文 `{ "id": "<public_id>" }` — 削除
//! - `GET /config` — アップロードウィジェット用の公開設定
//!
//! `static_dir` を指定すると、それ以外のパスはWeb(WASM)ビルドを配信する。

pub mod cache;
pub mod error;
pub mod routes;
pub mod state;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use routes::{delete_image, list_images, public_config};
pub use state::State;

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/images", get(list_images).delete(delete_image))
        .route("/config", get(public_config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config, static_dir: Option<PathBuf>) -> Result<()> {
    info!("Initializing state...");
    let port = config.port;
    let state = State::from_config(config)?;

    let mut app = router(state);
    if let Some(dir) = static_dir {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let address = format!("0.0.0.0:{}", port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
