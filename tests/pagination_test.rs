//! End-to-end pagination tests over a real SQLite database
//!
//! These exercise the cursor controller through the same SQLite-backed
//! stores the bot handlers use, including the upsert-with-default cursor
//! semantics and wraparound at both catalogue ends.

use std::sync::Arc;

use vitrina::catalogue::{Controller, CursorController, Direction, SqliteCatalogue, SqliteCursors};
use vitrina::core::AppError;
use vitrina::storage::db::{self, CatalogueItem};
use vitrina::storage::{create_pool, get_connection, DbPool};

const USER: i64 = 777;

fn seeded_pool(len: i64) -> (tempfile::TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vitrina.sqlite");
    let pool = Arc::new(create_pool(path.to_str().unwrap()).unwrap());

    let conn = get_connection(&pool).unwrap();
    for i in 0..len {
        db::insert_catalogue_item(
            &conn,
            &CatalogueItem {
                index: i,
                name: format!("NFT #{}", i),
                image: format!("https://cdn.example/{}.png", i),
                description: format!("description {}", i),
            },
        )
        .unwrap();
    }

    (dir, pool)
}

fn controller(pool: &Arc<DbPool>) -> Controller {
    Controller::new(SqliteCatalogue::new(Arc::clone(pool)), SqliteCursors::new(Arc::clone(pool)))
}

#[test]
fn previous_from_zero_wraps_to_last_item() {
    let (_dir, pool) = seeded_pool(5);
    let ctl = controller(&pool);

    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 0).unwrap();

    let card = ctl.advance(USER, Direction::Previous).unwrap();
    assert_eq!(card.position, 4);
    assert_eq!(card.name, "NFT #4");
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(4));
}

#[test]
fn next_from_last_wraps_to_first_item() {
    let (_dir, pool) = seeded_pool(5);
    let ctl = controller(&pool);

    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 4).unwrap();

    let card = ctl.advance(USER, Direction::Next).unwrap();
    assert_eq!(card.position, 0);
    assert_eq!(card.name, "NFT #0");
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(0));
}

#[test]
fn select_overrides_any_prior_position() {
    let (_dir, pool) = seeded_pool(5);
    let ctl = controller(&pool);

    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 4).unwrap();

    let card = ctl.select(USER, 2).unwrap();
    assert_eq!(card.position, 2);
    assert_eq!(card.name, "NFT #2");
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(2));
}

#[test]
fn out_of_range_select_leaves_cursor_untouched() {
    let (_dir, pool) = seeded_pool(5);
    let ctl = controller(&pool);

    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 3).unwrap();

    let err = ctl.select(USER, 17).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(3));
}

#[test]
fn first_interaction_creates_cursor_at_zero() {
    let (_dir, pool) = seeded_pool(3);
    let ctl = controller(&pool);

    // No /start happened: the users row does not exist yet
    let conn = get_connection(&pool).unwrap();
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), None);

    let card = ctl.advance(USER, Direction::Next).unwrap();
    assert_eq!(card.position, 1);
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(1));
}

#[test]
fn strict_controller_requires_existing_cursor() {
    let (_dir, pool) = seeded_pool(3);
    let ctl = CursorController::strict(SqliteCatalogue::new(Arc::clone(&pool)), SqliteCursors::new(Arc::clone(&pool)));

    let err = ctl.advance(USER, Direction::Next).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 1).unwrap();
    assert_eq!(ctl.advance(USER, Direction::Next).unwrap().position, 2);
}

#[test]
fn empty_catalogue_yields_defined_error() {
    let (_dir, pool) = seeded_pool(0);
    let ctl = controller(&pool);

    let err = ctl.advance(USER, Direction::Next).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn full_circle_returns_to_start() {
    let (_dir, pool) = seeded_pool(4);
    let ctl = controller(&pool);

    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 2).unwrap();

    for _ in 0..4 {
        ctl.advance(USER, Direction::Next).unwrap();
    }
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(2));

    for _ in 0..4 {
        ctl.advance(USER, Direction::Previous).unwrap();
    }
    assert_eq!(db::get_user_page(&conn, USER).unwrap(), Some(2));
}

#[test]
fn list_catalogue_matches_seeded_order() {
    let (_dir, pool) = seeded_pool(3);
    let ctl = controller(&pool);

    let first = ctl.list_catalogue().unwrap();
    let second = ctl.list_catalogue().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![
            ("NFT #0".to_string(), 0),
            ("NFT #1".to_string(), 1),
            ("NFT #2".to_string(), 2)
        ]
    );
}

#[test]
fn drifted_cursor_is_reported_not_wrapped() {
    let (_dir, pool) = seeded_pool(3);
    let ctl = controller(&pool);

    // Simulate the stores drifting apart: position beyond the catalogue
    let conn = get_connection(&pool).unwrap();
    db::set_user_page(&conn, USER, 42).unwrap();

    let err = ctl.advance(USER, Direction::Next).unwrap_err();
    assert!(matches!(err, AppError::Consistency(_)));
}
