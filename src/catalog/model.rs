use serde::Deserialize;

/// One track as returned by the catalog search endpoint.
///
/// Immutable once fetched. The result list owns its tracks; the currently
/// playing track is a clone held by the app model.
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    /// Catalog identifier, unique within one result set.
    pub id: u64,
    pub title: String,
    pub artist: Artist,
    pub album: Album,
    /// Full track length in whole seconds (not the preview length).
    pub duration: u64,
    /// URL of the 30-second preview clip.
    pub preview: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub picture_small: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub title: String,
    #[serde(default)]
    pub cover_medium: Option<String>,
}

/// A browsable genre. The list is static; selecting a genre just searches
/// for its name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}
