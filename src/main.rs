use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use matcha::config::{LogFormat, Settings};
use matcha::core::{RecommendationEngine, TraitModel};
use matcha::models::{RankingSettings, ScoringWeights};
use matcha::routes::{self, recommendations::AppState};
use matcha::services::{InMemoryCatalog, TracingEventSink};
use std::sync::Arc;
use tracing::{info, error};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration first so it can drive the subscriber
    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, format!("Failed to load configuration: {}", e))
    })?;

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(settings.logging.env_filter())
        .with_target(false)
        .with_level(true);

    match settings.logging.log_format() {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Full => subscriber.init(),
    }

    info!("Starting Matcha recommendation service...");
    info!("Configuration loaded successfully");

    // Load trait model (custom file or the built-in one)
    let model = match &settings.traits.path {
        Some(path) => {
            let source = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| startup_error("Failed to read trait model", e))?;
            TraitModel::from_toml_str(&source)
        }
        None => TraitModel::builtin(),
    }
    .map_err(|e| startup_error("Invalid trait model", e))?;

    info!("Trait model loaded ({} archetypes)", model.archetypes.len());

    // Load course catalog
    let catalog = InMemoryCatalog::load(&settings.catalog.path)
        .await
        .map_err(|e| startup_error("Failed to load catalog", e))?;

    // Initialize engine with configured weights
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let ranking = RankingSettings::from(&settings.ranking);

    let engine = RecommendationEngine::new(Arc::new(model), weights, ranking)
        .map_err(|e| startup_error("Invalid engine configuration", e))?;

    info!("Engine initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        engine: Arc::new(engine),
        catalog: Arc::new(catalog),
        events: Arc::new(TracingEventSink),
        max_limit: settings.ranking.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(routes::query_error_handler))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
