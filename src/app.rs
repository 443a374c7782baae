use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Request, Response},
    middleware, Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, Span};

use crate::{
    contact,
    cors::{reject_foreign_origin, AllowedOrigins},
    donations,
    error::{expose_stack, panic_response},
    events, health, registrations,
    state::AppState,
    team, users,
};

/// Largest accepted request body, JSON or multipart.
pub const BODY_LIMIT: usize = 9 * 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub fn build_app(state: AppState) -> Router {
    let origins = Arc::new(AllowedOrigins::from_config(&state.config));

    Router::new()
        .merge(health::health_routes())
        .merge(donations::router())
        .nest("/contact", contact::router())
        .nest("/events", events::router())
        .nest("/users", users::router())
        .nest("/team", team::router())
        .nest("/api/registrations", registrations::router())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), expose_stack))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(origins.cors_layer())
        .layer(middleware::from_fn_with_state(origins, reject_foreign_origin))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    let origin = req
                        .headers()
                        .get(header::ORIGIN)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        origin,
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|res: &Response<_>, latency: Duration, span: &Span| {
                    let status = res.status();
                    span.record("status", tracing::field::display(status));
                    let latency_ms = latency.as_millis() as u64;
                    if status.is_server_error() {
                        error!(%status, latency_ms, "response");
                    } else {
                        info!(%status, latency_ms, "response");
                    }
                }),
        )
        .with_state(state)
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
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
