pub mod persistence;
pub mod store;

pub use persistence::{CollectionSnapshot, SnapshotManager, SnapshotMetadata};
pub use store::BandCollection;
