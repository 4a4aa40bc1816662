pub use catalog::{Champion, ChampionCatalog, InMemoryChampionCatalog};

mod catalog;
