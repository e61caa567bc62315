//! Test enumerated fields: roundtrips, filtering, and the two storage
//! representations (variant name vs ordinal).

use tests::entities::*;
use tests::sqlite_factory;

use pretty_assertions::assert_eq;
use quarry::stmt::Select;
use quarry::Value;

#[test]
fn enum_fields_roundtrip() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut task = Task::new("ship it", Status::Active, Priority::High);
    session.insert(&mut task).unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let found: Task = session.find(task.id).unwrap().unwrap();
    assert_eq!(found.status, Status::Active);
    assert_eq!(found.priority, Priority::High);
}

#[test]
fn filters_compare_in_the_storage_representation() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    for (name, status, priority) in [
        ("a", Status::Active, Priority::High),
        ("b", Status::Draft, Priority::Low),
        ("c", Status::Active, Priority::Low),
    ] {
        session.insert(&mut Task::new(name, status, priority)).unwrap();
    }

    assert_eq!(
        session
            .count(Select::<Task>::filter(Task::STATUS.eq(Status::Active)))
            .unwrap(),
        2
    );
    assert_eq!(
        session
            .count(Select::<Task>::filter(Task::PRIORITY.eq(Priority::Low)))
            .unwrap(),
        2
    );
    assert_eq!(
        session
            .count(Select::<Task>::filter(
                Task::STATUS.in_list([Status::Draft, Status::Done])
            ))
            .unwrap(),
        1
    );
}

#[test]
fn storage_follows_the_declared_mode() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    session
        .insert(&mut Task::new("one", Status::Active, Priority::High))
        .unwrap();

    let rows = session
        .rows(Select::<Task>::all().project([Task::STATUS.into(), Task::PRIORITY.into()]))
        .unwrap();

    assert_eq!(rows.len(), 1);
    // Name-stored on one side, ordinal-stored on the other.
    assert_eq!(rows[0][0], Value::String("ACTIVE".to_string()));
    assert_eq!(rows[0][1], Value::I32(2));
}

#[test]
fn updates_rewrite_enum_fields() {
    let factory = sqlite_factory().unwrap();
    let mut session = factory.open_session().unwrap();

    let mut task = Task::new("ship it", Status::Draft, Priority::Low);
    session.insert(&mut task).unwrap();

    task.status = Status::Done;
    task.priority = Priority::Medium;
    session.update(&mut task).unwrap();
    session.commit().unwrap();

    let mut session = factory.open_session().unwrap();
    let found: Task = session.find(task.id).unwrap().unwrap();
    assert_eq!(found.status, Status::Done);
    assert_eq!(found.priority, Priority::Medium);
}
