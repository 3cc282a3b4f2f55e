use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllabus_console::api::{HttpSyllabusApi, MockSyllabusApi, SyllabusApi};
use syllabus_console::app::App;
use syllabus_console::cli;
use syllabus_console::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "syllabus_console=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new_from_env();

    let api: Arc<dyn SyllabusApi> = if config.use_mock {
        info!("running against the in-memory mock store");
        Arc::new(MockSyllabusApi::with_sample_course())
    } else {
        info!("using backend at {}", config.base_url);
        Arc::new(HttpSyllabusApi::new(&config)?)
    };

    if let Err(e) = api.ping().await {
        warn!("backend not reachable at startup: {}", e);
    }

    let mut app = App::new(api);
    app.load_courses().await;
    cli::run(&mut app).await
}
