use canvas::board::Board;
use canvas::doc;
use canvas::geom::Point;
use canvas::options::BoardOptions;
use canvas::store;

use super::*;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("squareboard-{}", uuid::Uuid::new_v4()))
}

fn sample_document() -> Document {
    let mut board = Board::new(BoardOptions::default());
    let id = board.add_square(Point::new(40.0, 60.0));
    board.select(Some(id));
    doc::to_document(&board)
}

#[test]
fn path_is_key_with_json_extension() {
    let store = FileStore::new(Path::new("/data"), "CANVAS_SQUARES");
    assert_eq!(store.path(), Path::new("/data/CANVAS_SQUARES.json"));
}

#[test]
fn missing_file_loads_nothing() {
    let dir = temp_dir();
    let mut store = FileStore::new(&dir, "board");
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_creates_directory_and_roundtrips() {
    let dir = temp_dir();
    let mut store = FileStore::new(&dir, "board");
    let doc = sample_document();
    store.save(&doc).unwrap();
    assert!(store.path().exists());
    assert!(!store.path().with_extension("json.tmp").exists());

    let mut reopened = FileStore::new(&dir, "board");
    assert_eq!(reopened.load().unwrap(), Some(doc));
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn save_overwrites_previous_document() {
    let dir = temp_dir();
    let mut store = FileStore::new(&dir, "board");
    store.save(&sample_document()).unwrap();
    store.save(&Document::default()).unwrap();
    assert_eq!(store.load().unwrap(), Some(Document::default()));
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn malformed_file_is_deleted() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let mut store = FileStore::new(&dir, "board");
    std::fs::write(store.path(), r#"{"squares": "nope"}"#).unwrap();

    assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_none());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn malformed_file_falls_back_to_empty_board() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let mut store = FileStore::new(&dir, "board");
    std::fs::write(store.path(), "[1, 2, 3]").unwrap();

    let board = store::load_or_empty(&mut store, BoardOptions::default());
    assert_eq!(board.square_count(), 0);
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn legacy_document_without_arrows_loads() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let mut store = FileStore::new(&dir, "board");
    std::fs::write(
        store.path(),
        r#"{"selectedSquareId":null,"squares":[{"id":"s1","position":{"x":10.5,"y":10.5},"size":50,
            "sockets":{"top":false,"right":true,"bottom":false,"left":false}}]}"#,
    )
    .unwrap();

    let board = store::load_or_empty(&mut store, BoardOptions::default());
    assert_eq!(board.square_count(), 1);
    assert_eq!(board.arrow_count(), 0);
    std::fs::remove_dir_all(dir).unwrap();
}
