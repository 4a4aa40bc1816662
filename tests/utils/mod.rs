pub mod archive_builders;
pub mod mocks;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use archive_builders::{random_archive, ArchiveBuilder, MatchBuilder};
#[allow(unused_imports)]
pub use mocks::{FailingIdentityStore, SlowMatchStore};
