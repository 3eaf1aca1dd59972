pub mod config;
pub mod database;
pub mod favorite_repo;
pub mod push;
pub mod reservation_repo;
pub mod venue_repo;

pub use config::Config;
pub use database::DbClient;
pub use favorite_repo::PostgresFavoriteRepository;
pub use push::HttpPushRelay;
pub use reservation_repo::PostgresReservationRepository;
pub use venue_repo::PostgresVenueRepository;
