pub mod notify;
pub mod repository;
pub mod reservation;
pub mod schedule;
pub mod venue;
