use foodie::{config::Config, db, repositories, services, AppState};

use repositories::{
    menu_repository::SqliteMenuRepository, order_repository::SqliteOrderRepository,
    otp_repository::SqliteOtpRepository, user_repository::SqliteUserRepository,
};
use services::{
    auth_service::AuthService, catalog_service::CatalogService, payment_service::PaymentService,
    token_service::TokenService,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodie=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Database connection
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize repositories
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let otp_repository = Arc::new(SqliteOtpRepository::new(pool.clone()));
    let menu_repository = Arc::new(SqliteMenuRepository::new(pool.clone()));
    let order_repository = Arc::new(SqliteOrderRepository::new(pool.clone()));

    // Initialize services
    let token_service = Arc::new(TokenService::new(config.jwt_secret.clone()));
    let email_service = services::create_email_service();
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        otp_repository,
        email_service,
        token_service.clone(),
    ));
    let catalog_service = Arc::new(CatalogService::new(menu_repository));
    let payment_service = Arc::new(PaymentService::new(order_repository));

    let app_state = AppState {
        auth_service,
        catalog_service,
        payment_service,
        token_service,
    };

    let app = foodie::app(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Server running on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
