use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use venuelink_api::{app, AppState};
use venuelink_booking::SessionState;
use venuelink_store::{
    DbClient, HttpPushRelay, PostgresFavoriteRepository, PostgresReservationRepository,
    PostgresVenueRepository,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "venuelink_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = venuelink_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting VenueLink API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let app_state = AppState {
        reservations: Arc::new(PostgresReservationRepository { pool: db.pool.clone() }),
        venues: Arc::new(PostgresVenueRepository { pool: db.pool.clone() }),
        favorites: Arc::new(PostgresFavoriteRepository { pool: db.pool.clone() }),
        push: Arc::new(HttpPushRelay::new(config.push.endpoint.clone())),
        session: Arc::new(Mutex::new(SessionState::new())),
        booking_rules: config.booking_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
