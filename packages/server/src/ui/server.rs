//! Server execution logic.

use std::{future::Future, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use irori_shared::time::{Clock, SystemClock};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    domain::{MessagePusher, PresenceRepository, StorageError},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
        storage::DiskFileStorage,
    },
    usecase::{GetPresenceUseCase, RelayUseCases, UploadFileUseCase},
};

use super::{
    dispatcher::RelayDispatcher,
    handler::{get_presence, health_check, index, upload_file, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to prepare upload directory: {0}")]
    UploadDir(#[from] StorageError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Chat and signaling relay server
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// let server = Server::from_config(&config).await?;
/// let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
/// server.run(listener).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
    dispatcher_task: JoinHandle<()>,
}

impl Server {
    /// Wire up the relay from a resolved configuration
    ///
    /// Dependencies are created in order:
    /// 1. Repository, MessagePusher and FileStorage
    /// 2. UseCases
    /// 3. Relay dispatcher
    /// 4. AppState
    ///
    /// The upload directory is created if it does not exist.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let repository: Arc<dyn PresenceRepository> =
            Arc::new(InMemoryPresenceRepository::default());
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());
        let storage = DiskFileStorage::new(&config.upload_dir);
        storage.ensure_root().await?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let relay_usecases = RelayUseCases::new(
            repository.clone(),
            message_pusher,
            clock.clone(),
            config.sender_policy,
        );
        let upload_file_usecase = Arc::new(UploadFileUseCase::new(Arc::new(storage), clock));
        let get_presence_usecase = Arc::new(GetPresenceUseCase::new(repository));

        let (relay, dispatcher_task) = RelayDispatcher::new(Arc::new(relay_usecases)).spawn();

        tracing::info!(
            "Sender policy: {}, uploads in '{}' (max {} bytes)",
            config.sender_policy,
            config.upload_dir.display(),
            config.max_upload_bytes
        );

        Ok(Self {
            state: Arc::new(AppState {
                relay,
                upload_file_usecase,
                get_presence_usecase,
            }),
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
            dispatcher_task,
        })
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            // ブラウザクライアント
            .route("/", get(index))
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route(
                "/upload",
                post(upload_file).layer(DefaultBodyLimit::max(self.max_upload_bytes)),
            )
            .route("/api/health", get(health_check))
            .route("/api/presence", get(get_presence))
            .nest_service("/uploads", ServeDir::new(&self.upload_dir))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("Irori server listening on {}", local_addr);
        tracing::info!("Open http://{}/ in a browser", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        self.dispatcher_task.abort();
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
