//! Remote document-store client.
//!
//! The sync engine and the level override manager talk to the remote store
//! through the [`RemoteStore`](remote::RemoteStore) trait; the HTTP
//! implementation lives in [`remote`]. Tests substitute an in-memory store.

pub mod remote;

pub use remote::{CatalogEntry, DeviceRecord, RemoteClient, RemoteEventDocument, RemoteStore};
