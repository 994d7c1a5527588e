use super::model::Genre;

/// The static genre list driving category browsing. No server round-trip;
/// never mutated.
pub const GENRES: &[Genre] = &[
    Genre { id: 1, name: "Pop" },
    Genre { id: 2, name: "Rock" },
    Genre { id: 3, name: "Jazz" },
    Genre { id: 4, name: "Classical" },
    Genre { id: 5, name: "Electronic" },
    Genre { id: 6, name: "Hip-Hop" },
    Genre { id: 7, name: "Reggae" },
    Genre { id: 8, name: "Country" },
    Genre { id: 9, name: "Metal" },
    Genre { id: 10, name: "Blues" },
    Genre { id: 11, name: "Folk" },
    Genre { id: 12, name: "Alternative" },
    Genre { id: 13, name: "Disco" },
    Genre { id: 14, name: "Soul" },
    Genre { id: 15, name: "Punk" },
    Genre { id: 16, name: "R&B" },
    Genre { id: 17, name: "Gospel" },
    Genre { id: 18, name: "Dance" },
    Genre { id: 19, name: "Latin" },
    Genre { id: 20, name: "Funk" },
    Genre { id: 21, name: "Opera" },
];

/// Look up a genre's display name by id.
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|g| g.id == id).map(|g| g.name)
}
