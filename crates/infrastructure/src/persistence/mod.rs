//! Persistence module
//!
//! SQLite-backed stores for experts, the GRNTI classifier and places.

pub mod connection;
pub mod error;
pub mod expert_store;
pub mod grnti_store;
pub mod migrations;
pub mod region_city_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use expert_store::SqliteExpertStore;
pub use grnti_store::SqliteGrntiStore;
pub use region_city_store::SqliteRegionCityStore;
