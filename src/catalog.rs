//! Catalog module: track data model, static genre list and the remote
//! search client.
//!
//! Everything the app knows about music comes from here; there is no local
//! library.

mod client;
mod genres;
mod model;

pub use client::*;
pub use genres::*;
pub use model::*;

#[cfg(test)]
mod tests;
