mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::configuration::ConfigurationService;
use crate::features::events::{routes as events_routes, EventService};
use crate::features::payments::PaymentService;
use crate::features::promo_codes::{routes as promo_codes_routes, PgCodeRepository, PromoCodeService};
use crate::features::reservations::{routes as reservations_routes, ReservationService};
use crate::features::ticket_categories::{
    routes as ticket_categories_routes, TicketCategoryService,
};
use crate::features::waiting_list::{routes as waiting_list_routes, WaitingListService};
use crate::modules::captcha::RecaptchaClient;
use crate::shared::clock::{Clock, SystemClock};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Settings and payment methods are shared by every event-facing service
    let configuration_service = Arc::new(ConfigurationService::new(pool.clone()));
    let payment_service = Arc::new(PaymentService::new(
        Arc::clone(&configuration_service),
        Arc::clone(&clock),
    ));

    let event_service = Arc::new(EventService::new(
        pool.clone(),
        Arc::clone(&configuration_service),
        Arc::clone(&payment_service),
        Arc::clone(&clock),
    ));
    tracing::info!("Event service initialized");

    let promo_code_service = Arc::new(PromoCodeService::new(
        Arc::new(PgCodeRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    tracing::info!("Promo code service initialized");

    let ticket_category_service = Arc::new(TicketCategoryService::new(
        pool.clone(),
        Arc::clone(&event_service),
        Arc::clone(&promo_code_service),
        Arc::clone(&configuration_service),
        Arc::clone(&clock),
    ));
    tracing::info!("Ticket category service initialized");

    let captcha_client = Arc::new(
        RecaptchaClient::new(&config.captcha)
            .map_err(|e| anyhow::anyhow!("Failed to initialize CAPTCHA client: {}", e))?,
    );

    let reservation_service = Arc::new(ReservationService::new(
        pool.clone(),
        Arc::clone(&event_service),
        Arc::clone(&ticket_category_service),
        Arc::clone(&promo_code_service),
        Arc::clone(&configuration_service),
        captcha_client,
        Arc::clone(&clock),
    ));
    tracing::info!("Reservation service initialized");

    let waiting_list_service = Arc::new(WaitingListService::new(
        pool.clone(),
        Arc::clone(&event_service),
    ));
    tracing::info!("Waiting list service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new()
        .merge(events_routes::routes(event_service))
        .merge(promo_codes_routes::routes(promo_code_service))
        .merge(ticket_categories_routes::routes(ticket_category_service))
        .merge(reservations_routes::routes(reservation_service))
        .merge(waiting_list_routes::routes(waiting_list_service))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    let app = Router::new()
        .merge(swagger)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
