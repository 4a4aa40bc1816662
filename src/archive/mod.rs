pub mod models;
pub mod repository;
mod snapshot;

pub use models::*;
pub use repository::{
    InMemoryMatchStore, InMemoryPlayerIdentityStore, MatchStore, PlayerIdentityStore,
};
pub use snapshot::{ArchiveSnapshot, ArchiveStores, ChampionEntry};
