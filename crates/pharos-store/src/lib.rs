//! Pharos Store
//!
//! External-collaborator contracts for persisting Pharos register data:
//! a key/value metadata store for `User`/`Project`/`Dataset` DTOs and a
//! paginated register store for large datasets. Both are `async_trait`
//! interfaces; no concrete backend (DynamoDB, SurrealDB, etc.) lives here.
//! In-memory fakes back this crate's own contract tests and are reusable
//! by `pharos-cli` and integration tests elsewhere in the workspace.

pub mod error;
pub mod fakes;
pub mod storage_traits;

pub use error::StoreError;
pub use fakes::{InMemoryMetadataStore, InMemoryRegisterPageStore};
pub use storage_traits::{MetadataStore, RegisterPageStore, StoreResult};

/// Pharos store crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
