mod common;

use common::{WORLD, block};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use tictactoe::board::Board;
use tictactoe::config::{MAIN_CONFIG_FILE, MainConfig};
use tictactoe::domain::core_types::{LogicalPosition, Orientation};
use tictactoe::engine::Engine;
use tictactoe::engine::events::Hand;
use tictactoe::store::{BOARDS_FILE, BoardStore, JsonBoardStore};
use tictactoe::test_helpers::MemoryHost;
use uuid::Uuid;

#[test]
fn test_config_is_created_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MAIN_CONFIG_FILE);

    let created = MainConfig::load_or_create(&path).unwrap();
    assert_eq!(created, MainConfig::default());
    assert!(path.exists(), "應寫入預設設定檔");

    std::fs::write(&path, "block_protection = false\nend_of_round_seconds = 1\n").unwrap();
    let loaded = MainConfig::load_or_create(&path).unwrap();
    assert!(!loaded.block_protection);
    assert_eq!(loaded.end_of_round_ticks(), 20);
    assert_eq!(loaded.remove_search_radius, 5.0);
}

#[test]
fn test_broken_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MAIN_CONFIG_FILE);
    std::fs::write(&path, "block_protection = [").unwrap();

    let err = MainConfig::load_or_create(&path).unwrap_err();
    assert!(err.to_string().contains(MAIN_CONFIG_FILE));
}

#[test]
fn test_json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonBoardStore::in_dir(dir.path());
    assert_eq!(store.path(), dir.path().join(BOARDS_FILE));

    assert!(store.load_boards().unwrap().is_empty(), "檔案不存在時沒有棋盤");

    let boards: BTreeMap<_, _> = [
        Board::new(Uuid::from_u128(1), block(0, 64, 0).to_vector()),
        Board::new(Uuid::from_u128(2), block(-8, 70, 12).to_vector()),
    ]
    .into_iter()
    .map(|board| (board.id(), board))
    .collect();
    store.save_boards(&boards).unwrap();

    let mut reopened = JsonBoardStore::in_dir(dir.path());
    assert_eq!(reopened.load_boards().unwrap(), boards);
}

#[test]
fn test_malformed_board_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(BOARDS_FILE), "[1, 2").unwrap();

    let err = JsonBoardStore::in_dir(dir.path()).load_boards().unwrap_err();
    let message = err.to_string();
    assert!(message.contains(BOARDS_FILE));
    assert!(message.contains("載入棋盤檔案"));
}

#[test]
fn test_created_board_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MemoryHost::with_world(WORLD);
    let grid = host.build_grid(&block(10, 70, 10), Orientation::South);
    let admin = host.add_player("Admin");

    let mut engine = Engine::with_rng(
        host,
        JsonBoardStore::in_dir(dir.path()),
        MainConfig::default(),
        StdRng::seed_from_u64(1),
    );
    assert!(engine.boards().is_empty());
    engine.begin_board_creation(admin);
    engine.on_slot_interact(admin, &grid[LogicalPosition::Center.index()], Hand::Main);
    assert_eq!(engine.boards().len(), 1);
    let saved = engine.boards().boards().clone();

    let mut restarted = JsonBoardStore::in_dir(dir.path());
    assert_eq!(restarted.load_boards().unwrap(), saved);
}
