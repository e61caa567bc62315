//! Test the session lifecycle: lazy transaction start, terminal commit and
//! rollback, and the rollback-only state after a failed statement.

use tests::entities::*;
use tests::sqlite_factory;

use pretty_assertions::assert_eq;
use quarry::stmt::Select;

#[test]
fn commit_is_terminal() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    session.insert(&mut User::new("alice", 33)).unwrap();
    session.commit().unwrap();

    let err = session.insert(&mut User::new("bob", 25)).unwrap_err();
    assert!(err.is_session_state());
    assert!(session.rollback().unwrap_err().is_session_state());
}

#[test]
fn rollback_discards_pending_writes() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    session.insert(&mut User::new("alice", 33)).unwrap();
    session.rollback().unwrap();

    let mut session = factory.open_session().unwrap();
    assert_eq!(session.count(Select::<User>::all()).unwrap(), 0);
}

#[test]
fn a_failed_statement_leaves_the_session_rollback_only() {
    let factory = sqlite_factory().unwrap();
    let mut setup = factory.open_session().unwrap();
    setup.insert(&mut Document::new(1, "original", "...")).unwrap();
    setup.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let err = session
        .insert(&mut Document::new(1, "duplicate", "..."))
        .unwrap_err();
    assert!(err.is_execution());

    let err = session.count(Select::<Document>::all()).unwrap_err();
    assert!(err.is_session_state());
    assert!(session.commit().unwrap_err().is_session_state());

    // Rollback is still allowed and clears the way for a new session.
    session.rollback().unwrap();

    let mut session = factory.open_session().unwrap();
    let found: Document = session.find(1i64).unwrap().unwrap();
    assert_eq!(found.title, "original");
}

#[test]
fn close_rolls_back_open_work() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    session.insert(&mut User::new("alice", 33)).unwrap();
    session.close().unwrap();

    let mut session = factory.open_session().unwrap();
    assert_eq!(session.count(Select::<User>::all()).unwrap(), 0);
}

#[test]
fn dropping_a_session_rolls_back() {
    let factory = sqlite_factory().unwrap();
    {
        let mut session = factory.open_session().unwrap();
        session.insert(&mut User::new("alice", 33)).unwrap();
    }

    let mut session = factory.open_session().unwrap();
    assert_eq!(session.count(Select::<User>::all()).unwrap(), 0);
}

#[test]
fn read_only_sessions_commit_without_a_transaction() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    assert_eq!(session.count(Select::<User>::all()).unwrap(), 0);
    session.commit().unwrap();
}
