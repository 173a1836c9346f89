pub mod gateway;
pub mod manager;
pub mod models;
pub mod postgres;

pub use gateway::{Lookup, MapGateway, MapId, PointId};
pub use manager::{DatabaseManager, PersistenceError};
pub use postgres::PgGateway;
