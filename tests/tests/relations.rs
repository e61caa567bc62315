//! Test relation hydration: eager to-many rows arrive with their parent,
//! lazy ones only on an explicit load, and many-to-many links go through the
//! join table.

use tests::entities::*;
use tests::sqlite_factory;

use pretty_assertions::assert_eq;
use quarry::stmt::Select;

#[test]
fn lazy_relations_load_on_demand() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut playlist = Playlist::new("focus");
    session.insert(&mut playlist).unwrap();
    session
        .insert(&mut Track::new(playlist.id, "one"))
        .unwrap();
    session
        .insert(&mut Track::new(playlist.id, "two"))
        .unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let mut playlist: Playlist = session.find(playlist.id).unwrap().unwrap();

    assert!(!playlist.tracks.is_loaded());
    let err = playlist.tracks.get().unwrap_err();
    assert!(err.is_session_state());

    let tracks = playlist.tracks.load(&mut session).unwrap();
    assert_eq!(tracks.len(), 2);

    // Loading again is a no-op over the already hydrated rows.
    assert_eq!(playlist.tracks.load(&mut session).unwrap().len(), 2);
    assert!(playlist.tracks.get().is_ok());
}

#[test]
fn eager_relations_hydrate_with_their_parent() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut album = Album::new("blue");
    session.insert(&mut album).unwrap();
    session.insert(&mut Song::new(album.id, "so what")).unwrap();
    session
        .insert(&mut Song::new(album.id, "all blues"))
        .unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let album: Album = session.find(album.id).unwrap().unwrap();

    let mut titles: Vec<&str> = album.songs.iter().map(|song| song.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["all blues", "so what"]);
}

#[test]
fn eager_rows_are_partitioned_per_parent() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut blue = Album::new("blue");
    let mut red = Album::new("red");
    session.insert(&mut blue).unwrap();
    session.insert(&mut red).unwrap();
    session.insert(&mut Song::new(blue.id, "b1")).unwrap();
    session.insert(&mut Song::new(blue.id, "b2")).unwrap();
    session.insert(&mut Song::new(red.id, "r1")).unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let albums = session
        .all(Select::<Album>::all().order_by(Album::TITLE.asc()))
        .unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].songs.len(), 2);
    assert_eq!(albums[1].songs.len(), 1);
    assert!(albums[1].songs.iter().all(|song| song.album_id == red.id));
}

#[test]
fn link_and_unlink_manage_the_join_table() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut post = Post::new("hello");
    let mut intro = Tag::new("intro");
    let mut rust = Tag::new("rust");
    session.insert(&mut post).unwrap();
    session.insert(&mut intro).unwrap();
    session.insert(&mut rust).unwrap();
    session.link(&post, Post::TAGS, &intro).unwrap();
    session.link(&post, Post::TAGS, &rust).unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let mut found: Post = session.find(post.id).unwrap().unwrap();
    assert_eq!(found.tags.load(&mut session).unwrap().len(), 2);

    session.unlink(&post, Post::TAGS, &intro).unwrap();
    let mut found: Post = session.find(post.id).unwrap().unwrap();
    let tags = found.tags.load(&mut session).unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "rust");
}

#[test]
fn linked_tags_are_shared_between_posts() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut first = Post::new("first");
    let mut second = Post::new("second");
    let mut shared = Tag::new("shared");
    session.insert(&mut first).unwrap();
    session.insert(&mut second).unwrap();
    session.insert(&mut shared).unwrap();
    session.link(&first, Post::TAGS, &shared).unwrap();
    session.link(&second, Post::TAGS, &shared).unwrap();

    let mut first: Post = session.find(first.id).unwrap().unwrap();
    let mut second: Post = session.find(second.id).unwrap().unwrap();
    assert_eq!(first.tags.load(&mut session).unwrap().len(), 1);
    assert_eq!(second.tags.load(&mut session).unwrap().len(), 1);
}
