use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use clap::Parser;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use sitemap2md::archive::{ARCHIVE_FILE_NAME, ARCHIVE_MIME_TYPE};
use sitemap2md::pipeline::{CrawlOptions, CrawlOutcome};
use sitemap2md::status::TracingSink;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Timeout for each page request.
    #[arg(long, default_value_t = 10)]
    page_timeout_secs: u64,
}

#[derive(Debug, Clone)]
struct AppState {
    page_timeout: Duration,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    sitemap2md::logging::init()?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting sitemap2md-app");

    let state = AppState {
        page_timeout: Duration::from_secs(args.page_timeout_secs),
    };

    let app = Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/crawl", get(crawl_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[derive(Debug, Deserialize)]
struct CrawlQuery {
    #[serde(default)]
    sitemap_url: String,
}

async fn crawl_handler(
    State(state): State<AppState>,
    Query(q): Query<CrawlQuery>,
) -> Result<Response, (StatusCode, String)> {
    let raw = q.sitemap_url.trim();
    if !raw.is_empty() {
        let url = url::Url::parse(raw).map_err(|err| {
            (
                StatusCode::BAD_REQUEST,
                format!("invalid sitemap_url query parameter: {err}"),
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err((
                StatusCode::BAD_REQUEST,
                "sitemap_url must be http/https".to_string(),
            ));
        }
    }

    let options = CrawlOptions::new(raw).with_page_timeout(state.page_timeout);
    let outcome = tokio::task::spawn_blocking(move || {
        sitemap2md::pipeline::run(&options, &mut TracingSink)
    })
    .await
    .map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("join crawl task: {err}"),
        )
    })?
    .map_err(|err| {
        tracing::error!(?err, "crawl failed");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
    })?;

    let report = match outcome {
        CrawlOutcome::Ready(report) => report,
        CrawlOutcome::Warned(warning) => {
            return Err((StatusCode::UNPROCESSABLE_ENTITY, warning.to_string()));
        }
    };

    let mut resp = Response::new(axum::body::Body::from(report.archive.into_bytes()));
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(ARCHIVE_MIME_TYPE),
    );
    resp.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{ARCHIVE_FILE_NAME}\""))
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "build content-disposition header".to_string(),
                )
            })?,
    );
    Ok(resp)
}
