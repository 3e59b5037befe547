//! Concrete collaborators
//!
//! - [`flat_file`]: JSON-per-height block storage backing `BlockQuery`
//! - [`signer`]: Ed25519 node signer
//! - [`block_factory`]: plain block assembly
//! - [`wsv_factory`]: in-memory temporary WSV issuance

mod block_factory;
mod flat_file;
mod signer;
mod wsv_factory;

pub use block_factory::StandardBlockFactory;
pub use flat_file::{BlockStoreError, FlatFileBlockStore, FlatFileBlockStoreFactory};
pub use signer::Ed25519BlockSigner;
pub use wsv_factory::InMemoryWsvFactory;
