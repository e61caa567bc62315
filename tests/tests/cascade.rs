//! Test delete cascading: dependents of cascade relations go with their
//! parent, non-cascade dependents are left behind.

use tests::entities::*;
use tests::sqlite_factory;

use pretty_assertions::assert_eq;
use quarry::stmt::Select;

#[test]
fn deleting_a_parent_cascades_to_dependents() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut playlist = Playlist::new("road trip");
    session.insert(&mut playlist).unwrap();
    session
        .insert(&mut Track::new(playlist.id, "one"))
        .unwrap();
    session
        .insert(&mut Track::new(playlist.id, "two"))
        .unwrap();

    session.delete(&playlist).unwrap();

    assert_eq!(session.count(Select::<Playlist>::all()).unwrap(), 0);
    assert_eq!(session.count(Select::<Track>::all()).unwrap(), 0);
}

#[test]
fn cascading_spares_other_parents() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut doomed = Playlist::new("doomed");
    let mut kept = Playlist::new("kept");
    session.insert(&mut doomed).unwrap();
    session.insert(&mut kept).unwrap();
    session.insert(&mut Track::new(doomed.id, "a")).unwrap();
    session.insert(&mut Track::new(kept.id, "b")).unwrap();

    session.delete(&doomed).unwrap();

    let remaining = session.all(Select::<Track>::all()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].playlist_id, kept.id);
}

#[test]
fn non_cascade_dependents_are_left_behind() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut team = Team::new("reds");
    session.insert(&mut team).unwrap();
    session.insert(&mut Player::new(team.id, "ada")).unwrap();

    session.delete(&team).unwrap();

    assert_eq!(session.count(Select::<Team>::all()).unwrap(), 0);
    assert_eq!(session.count(Select::<Player>::all()).unwrap(), 1);
}

#[test]
fn bulk_delete_cascades_per_matching_row() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut old_a = Playlist::new("old a");
    let mut old_b = Playlist::new("old b");
    let mut keep = Playlist::new("keep");
    session.insert(&mut old_a).unwrap();
    session.insert(&mut old_b).unwrap();
    session.insert(&mut keep).unwrap();
    session.insert(&mut Track::new(old_a.id, "a1")).unwrap();
    session.insert(&mut Track::new(old_b.id, "b1")).unwrap();
    session.insert(&mut Track::new(keep.id, "k1")).unwrap();

    let removed = session
        .exec_delete(Select::<Playlist>::filter(Playlist::NAME.like("old%")).delete())
        .unwrap();
    assert_eq!(removed, 2);

    let remaining = session.all(Select::<Track>::all()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].playlist_id, keep.id);
}

#[test]
fn deleting_a_post_removes_its_join_rows_but_not_its_tags() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut post = Post::new("hello");
    let mut tag = Tag::new("intro");
    session.insert(&mut post).unwrap();
    session.insert(&mut tag).unwrap();
    session.link(&post, Post::TAGS, &tag).unwrap();

    session.delete(&post).unwrap();

    // The tag survives; only the link went away.
    assert_eq!(session.count(Select::<Tag>::all()).unwrap(), 1);

    // A new post sharing nothing with the old one sees no tags.
    let mut fresh = Post::new("fresh");
    session.insert(&mut fresh).unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let mut fresh: Post = session.find(fresh.id).unwrap().unwrap();
    assert!(fresh.tags.load(&mut session).unwrap().is_empty());
}
