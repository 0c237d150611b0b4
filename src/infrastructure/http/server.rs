//! HTTP server implementation
//!
//! Wires the stats provider, the optional middleware stages and the routes
//! together, then serves until SIGINT/SIGTERM.

use crate::{
    application::{services::StatsProvider, use_cases::GetStatsUseCase},
    config::AppConfig,
    infrastructure::{
        adapters::{FilesystemStatsProvider, UpstreamProxy},
        http::{processors::RequestPipeline, routes::RouteBuilder},
    },
    middleware::{cache::CacheMiddleware, rate_limit::RateLimitMiddleware},
    shared::error::{AppError, AppResult},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};
use warp::{Filter, Reply};

/// HTTP server for the statistics API and dashboard pages
pub struct HttpServer {
    config: AppConfig,
    stats_use_case: Arc<GetStatsUseCase>,
    pipeline: RequestPipeline,
}

impl HttpServer {
    /// Create a server reading stats from the configured log directory
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let provider = Arc::new(FilesystemStatsProvider::from_config(&config));
        info!(log_dir = %provider.log_dir().display(), "Reading ckpool status files");
        Self::with_provider(config, provider)
    }

    /// Create a server with an explicit stats provider
    pub fn with_provider(config: AppConfig, provider: Arc<dyn StatsProvider>) -> AppResult<Self> {
        config.validate_config()?;

        let stats_use_case = Arc::new(GetStatsUseCase::new(provider));

        let rate_limit = RateLimitMiddleware::from_config(&config.rate_limit)?.map(Arc::new);
        let cache = CacheMiddleware::from_config(&config)?.map(Arc::new);
        let proxy = if config.proxy.enabled {
            Some(Arc::new(UpstreamProxy::new(&config.proxy)?))
        } else {
            None
        };

        Ok(Self {
            config,
            stats_use_case,
            pipeline: RequestPipeline {
                rate_limit,
                cache,
                proxy,
            },
        })
    }

    /// The optional stages shared by every route
    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    /// The application routes
    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        RouteBuilder::build_routes(&self.config, self.stats_use_case.clone(), self.pipeline.clone())
    }

    /// Bind and serve until a shutdown signal, then drain in-flight requests
    /// for at most the configured grace period
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.listen_address()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;
        info!("HTTP server listening on {}", addr);

        let janitor = self
            .pipeline
            .cache
            .as_ref()
            .map(|cache| cache.adapter().spawn_janitor());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let server = warp::serve(self.routes())
            .incoming(listener)
            .graceful(async move {
                let _ = shutdown_rx.await;
            })
            .run();
        tokio::pin!(server);

        tokio::select! {
            _ = &mut server => {
                warn!("HTTP server stopped without a shutdown signal");
            }
            _ = shutdown_signal() => {
                info!("Shutdown signal received, draining in-flight requests");
                let _ = shutdown_tx.send(());

                let grace = self.config.shutdown_grace();
                if tokio::time::timeout(grace, &mut server).await.is_err() {
                    warn!(grace_seconds = grace.as_secs(), "Shutdown grace period expired");
                }
            }
        }

        if let Some(janitor) = janitor {
            janitor.abort();
        }

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolves on SIGINT, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
