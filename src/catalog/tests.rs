use super::client::parse_search_body;
use super::*;

const SAMPLE_BODY: &str = r#"{
  "data": [
    {
      "id": 3135556,
      "title": "Harder, Better, Faster, Stronger",
      "artist": { "name": "Daft Punk", "picture_small": "https://cdn.example/artist/27/56x56.jpg" },
      "album": { "title": "Discovery", "cover_medium": "https://cdn.example/cover/2e/250x250.jpg" },
      "duration": 224,
      "preview": "https://cdn.example/preview/3135556.mp3"
    },
    {
      "id": 3135557,
      "title": "Voyager",
      "artist": { "name": "Daft Punk" },
      "album": { "title": "Discovery" },
      "duration": 227,
      "preview": "https://cdn.example/preview/3135557.mp3"
    }
  ],
  "total": 2
}"#;

#[test]
fn parses_track_fields_from_search_body() {
    let tracks = parse_search_body(SAMPLE_BODY).unwrap();
    assert_eq!(tracks.len(), 2);

    let first = &tracks[0];
    assert_eq!(first.id, 3135556);
    assert_eq!(first.title, "Harder, Better, Faster, Stronger");
    assert_eq!(first.artist.name, "Daft Punk");
    assert_eq!(first.album.title, "Discovery");
    assert_eq!(first.duration, 224);
    assert_eq!(first.preview, "https://cdn.example/preview/3135556.mp3");
}

#[test]
fn artwork_urls_are_optional() {
    let tracks = parse_search_body(SAMPLE_BODY).unwrap();
    assert!(tracks[0].artist.picture_small.is_some());
    assert!(tracks[1].artist.picture_small.is_none());
    assert!(tracks[1].album.cover_medium.is_none());
}

#[test]
fn absent_data_array_is_an_empty_result_set() {
    let tracks = parse_search_body(r#"{"total": 0}"#).unwrap();
    assert!(tracks.is_empty());
}

#[test]
fn malformed_bodies_are_errors() {
    assert!(parse_search_body("not json at all").is_err());
    assert!(parse_search_body(r#"{"data": 5}"#).is_err());
    assert!(parse_search_body(r#"{"data": [{"id": "nope"}]}"#).is_err());
}

#[test]
fn genre_list_has_unique_ids() {
    let mut ids: Vec<u32> = GENRES.iter().map(|g| g.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), GENRES.len());
    assert_eq!(GENRES.len(), 21);
}

#[test]
fn genre_name_looks_up_known_and_unknown_ids() {
    assert_eq!(genre_name(2), Some("Rock"));
    assert_eq!(genre_name(16), Some("R&B"));
    assert_eq!(genre_name(999), None);
}
