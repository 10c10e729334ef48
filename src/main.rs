use std::sync::Arc;

use zenbox::api::inbox_routes;
use zenbox::classify::HttpClassifier;
use zenbox::config::AppConfig;
use zenbox::ingest::pipeline::IngestPipeline;
use zenbox::ingest::refresher::{Refresher, spawn_refresh_task};
use zenbox::source::HttpMailSource;
use zenbox::state::InboxState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("📬 Zenbox v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Mail API: {}", config.mail_api_url);
    eprintln!("   Classifier: {}", config.classifier_url);
    eprintln!("   Role: {}", config.role);
    eprintln!(
        "   Refresh: {} emails every {}s",
        config.batch_size,
        config.refresh_interval.as_secs()
    );
    eprintln!("   Inbox API: http://0.0.0.0:{}/api/emails\n", config.http_port);

    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let source = Arc::new(HttpMailSource::new(client.clone(), &config.mail_api_url));
    let classifier = Arc::new(HttpClassifier::new(client, &config.classifier_url));

    // The first fetch triggers the backend's account linking; do it once
    // before the refresh loop starts.
    source.warm_up().await;

    let inbox = InboxState::new();
    let pipeline = IngestPipeline::new(source, classifier);
    let refresher = Arc::new(Refresher::new(pipeline, Arc::clone(&inbox), config.batch_size));

    let (_refresh_handle, _shutdown) =
        spawn_refresh_task(Arc::clone(&refresher), config.refresh_interval);

    let app = inbox_routes(inbox, refresher, config.role);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;
    tracing::info!(port = config.http_port, "Inbox REST server started");
    axum::serve(listener, app).await?;

    Ok(())
}
