//! Proxy playlists from the music catalog.
//!
//! This crate exchanges client credentials for a catalog access token, walks a
//! catalog user's paginated playlist listing and reshapes the public playlists
//! into the gallery's [`Playlist`] format. With the `server` feature, the same
//! flow is exposed as a small HTTP function.

mod catalog;
mod error;
mod model;
#[cfg(feature = "server")]
pub mod server;
mod validate;

pub use catalog::{Catalog, CatalogClient, CatalogConfig, Credentials};
pub use error::ProxyError;
pub use model::{
    transform_playlists, ExternalUrls, Playlist, PlaylistsResponse, RawImage, RawPlaylist,
    RawPlaylistPage, TracksRef,
};
pub use validate::validate_user_id;
