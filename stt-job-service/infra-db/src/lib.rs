pub mod connection;
pub mod entity;
pub mod repository;
pub mod schema;

pub use connection::{connect, DatabaseSettings};
pub use repository::SeaOrmJobRepository;
pub use schema::create_schema;
