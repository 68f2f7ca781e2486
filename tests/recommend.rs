use tf_idf_recommender::{build_index, recommend, CatalogItem, Error, Index};

fn song(id: &str, name: &str, genre: &str, artist: &str, album: &str, explicit: bool) -> CatalogItem {
    CatalogItem::new(id, name)
        .with_genres(&[genre])
        .with_artists(&[artist])
        .with_album(album)
        .with_explicit(explicit)
}

fn three_songs() -> Vec<CatalogItem> {
    vec![
        song("1", "Song A", "rock", "X", "Z", false),
        song("2", "Song B", "rock", "Y", "Z", false),
        song("3", "Song C", "jazz", "W", "Q", true),
    ]
}

fn mixed_catalog() -> Vec<CatalogItem> {
    vec![
        song("1", "Neon Nights", "synthwave", "Lumen Drive", "Afterglow", false),
        song("2", "City Lights", "synthwave", "Lumen Drive", "Afterglow", true),
        song("3", "Blue Smoke", "jazz", "Mara Quintet", "Late Sets", false),
        song("4", "Hard Rain", "metal", "Iron Vale", "Storm Front", true),
        song("5", "Quiet Harbor", "folk", "Wren Hollow", "Tidelines", false),
        CatalogItem::new("6", "Untagged").with_album("Singles"),
        song("7", "Slow Burn", "jazz", "Mara Quintet", "Late Sets", false),
    ]
}

#[test]
fn shared_genre_and_album_ranks_first() {
    let index = build_index(three_songs()).unwrap();
    let hits = recommend(&index, "Song A", 2).unwrap();
    assert_eq!(hits.names(), vec!["Song B", "Song C"]);
    assert!(hits.list[0].score > hits.list[1].score);
}

#[test]
fn unknown_name_is_item_not_found() {
    let index = build_index(three_songs()).unwrap();
    let err = recommend(&index, "nonexistent", 5).unwrap_err();
    assert!(matches!(err, Error::ItemNotFound(ref name) if name == "nonexistent"));
}

#[test]
fn single_item_catalog_gives_empty_result() {
    let index = build_index(vec![song("1", "Lonely", "rock", "Solo", "One", false)]).unwrap();
    assert!(recommend(&index, "Lonely", 5).unwrap().is_empty());
}

#[test]
fn empty_catalog_is_rejected() {
    assert!(matches!(build_index(Vec::new()), Err(Error::EmptyCatalog)));
}

#[test]
fn duplicate_names_resolve_to_first_occurrence() {
    let index = build_index(vec![
        song("1", "Dup", "rock", "Ann", "First", false),
        song("2", "Dup", "jazz", "Bob", "Second", true),
        song("3", "Near First", "rock", "Ann", "First", false),
        song("4", "Near Second", "jazz", "Bob", "Second", true),
    ])
    .unwrap();
    for _ in 0..3 {
        let hits = recommend(&index, "dup", 1).unwrap();
        assert_eq!(hits.names(), vec!["Near First"]);
    }
}

#[test]
fn similarity_is_symmetric_with_maximal_diagonal() {
    let index = build_index(mixed_catalog()).unwrap();
    let sim = index.similarity_matrix();
    let n = index.len();
    assert_eq!(sim.dim(), n);
    for i in 0..n {
        let diag = sim.get(i, i).unwrap();
        for j in 0..n {
            let s = sim.get(i, j).unwrap();
            assert!((s - sim.get(j, i).unwrap()).abs() < 1e-6);
            assert!((0.0..=1.0 + 1e-6).contains(&s));
            assert!(s <= diag + 1e-6);
        }
    }
}

#[test]
fn result_length_is_bounded_by_catalog_and_top_n() {
    let index = build_index(mixed_catalog()).unwrap();
    let n = index.len();
    for top_n in [0, 1, 3, n - 1, n, n + 10] {
        let hits = recommend(&index, "Neon Nights", top_n).unwrap();
        assert_eq!(hits.len(), top_n.min(n - 1));
        assert!(hits.iter().all(|h| h.item.name != "Neon Nights"));
        assert!(hits.list.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn building_twice_gives_identical_results() {
    let a = build_index(mixed_catalog()).unwrap();
    let b = build_index(mixed_catalog()).unwrap();
    assert_eq!(a.similarity_matrix().row(2), b.similarity_matrix().row(2));
    let ha = recommend(&a, "Blue Smoke", 4).unwrap();
    let hb = recommend(&b, "Blue Smoke", 4).unwrap();
    assert_eq!(ha.names(), hb.names());
    assert_eq!(ha.names()[0], "Slow Burn");
}

#[test]
fn untagged_item_still_gets_recommendations() {
    let index = build_index(mixed_catalog()).unwrap();
    let hits = recommend(&index, "untagged", 3).unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn vectorizer_transform_matches_stored_rows() {
    let items = mixed_catalog();
    let index: Index = build_index(items.clone()).unwrap();
    let vectorizer = index.vectorizer();
    for (i, item) in items.iter().enumerate() {
        let row = vectorizer.transform(&item.content());
        let stored = index.term_matrix().row(i).unwrap();
        assert_eq!(row.indices(), stored.indices());
        for (a, b) in row.values().iter().zip(stored.values()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
