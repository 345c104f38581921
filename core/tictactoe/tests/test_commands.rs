mod common;

use common::{Scene, WORLD};
use tictactoe::command::CommandSender;
use tictactoe::domain::alias::PlayerId;
use tictactoe::domain::core_types::{LogicalPosition, WorldVector};
use tictactoe::lang;

fn player(id: PlayerId, is_admin: bool) -> CommandSender {
    CommandSender::Player {
        id,
        location: WorldVector::new(WORLD, 1.5, 64.5, 2.5),
        is_admin,
    }
}

#[test]
fn test_console_lists_boards_without_prefix() {
    let mut scene = Scene::new();
    scene
        .engine
        .execute_command(&CommandSender::Console, &["board", "list"]);

    let lines = scene.engine.host().console_messages();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Board List (1):");
    assert_eq!(
        lines[1],
        format!(" - 0, 64, 0, ({})", scene.board).as_str()
    );
}

#[test]
fn test_board_commands_need_admin() {
    let mut scene = Scene::new();
    let alice = scene.alice;
    scene
        .engine
        .execute_command(&player(alice, false), &["board", "list"]);

    let messages = scene.engine.host().messages_to(alice);
    assert_eq!(
        messages[0],
        format!("{}{}", lang::PLUGIN_PREFIX, lang::ERROR_PERMISSION_DENIED)
    );
    assert!(messages.iter().any(|m| m.ends_with(lang::COMMAND_HELP_TITLE)));
    assert!(
        !messages.iter().any(|m| m.contains("/tictactoe board -")),
        "非管理員的說明不應列出 board"
    );
    assert!(!messages.iter().any(|m| m.contains("Board List")));
}

#[test]
fn test_admin_help_lists_board_entry() {
    let mut scene = Scene::new();
    let alice = scene.alice;
    scene.engine.execute_command(&player(alice, true), &["help"]);
    assert!(scene.engine.host().received(alice, "/tictactoe board - Access board specific commands"));
    assert!(scene.engine.host().received(alice, "/tictactoe leave - Leave the current game"));

    scene.engine.execute_command(&player(alice, true), &["board"]);
    assert!(scene.engine.host().received(alice, "/tictactoe board create - Creates a board"));
}

#[test]
fn test_version() {
    let mut scene = Scene::new();
    scene
        .engine
        .execute_command(&CommandSender::Console, &["version"]);
    let expected = format!("TicTacToe version {}.", env!("CARGO_PKG_VERSION"));
    assert_eq!(scene.engine.host().console_messages(), vec![expected.as_str()]);
}

#[test]
fn test_leave_command() {
    let mut scene = Scene::new();
    let alice = scene.alice;

    scene.engine.execute_command(&player(alice, false), &["leave"]);
    assert!(scene.engine.host().received(alice, lang::ERROR_NOT_IN_GAME));

    scene.click(alice, LogicalPosition::Center);
    scene.engine.execute_command(&player(alice, false), &["leave"]);
    assert!(!scene.game().has_player(alice));
    assert!(scene.engine.host().received(alice, "Alice has left this game."));
}

#[test]
fn test_console_cannot_leave_or_create() {
    let mut scene = Scene::new();
    scene
        .engine
        .execute_command(&CommandSender::Console, &["leave"]);
    scene
        .engine
        .execute_command(&CommandSender::Console, &["board", "create"]);
    assert_eq!(
        scene.engine.host().console_messages(),
        vec![lang::ERROR_NOT_PLAYER, lang::ERROR_NOT_PLAYER]
    );
}

#[test]
fn test_create_and_cancel_commands() {
    let mut scene = Scene::new();
    let bob = scene.bob;

    scene
        .engine
        .execute_command(&player(bob, true), &["board", "create"]);
    assert!(scene.engine.is_board_creator(bob));
    assert!(scene.engine.host().received(bob, lang::COMMAND_BOARD_CREATE_START));

    scene
        .engine
        .execute_command(&player(bob, true), &["board", "cancel"]);
    assert!(!scene.engine.is_board_creator(bob));
    assert!(scene.engine.host().received(bob, lang::COMMAND_BOARD_CREATE_CANCEL));
}

#[test]
fn test_remove_nearest_board() {
    let mut scene = Scene::new();
    let bob = scene.bob;
    scene
        .engine
        .execute_command(&player(bob, true), &["board", "remove"]);

    assert!(scene.engine.boards().is_empty());
    assert!(scene.engine.host().received(bob, lang::SUCCESS_BOARD_REMOVE));
}

#[test]
fn test_remove_nearest_outside_radius_fails() {
    let mut scene = Scene::new();
    let bob = scene.bob;
    let far = CommandSender::Player {
        id: bob,
        location: WorldVector::new(WORLD, 40.0, 64.5, 0.5),
        is_admin: true,
    };
    scene.engine.execute_command(&far, &["board", "remove"]);

    assert_eq!(scene.engine.boards().len(), 1);
    assert!(scene.engine.host().received(bob, lang::ERROR_BOARD_REMOVE));
}

#[test]
fn test_remove_board_by_id() {
    let mut scene = Scene::new();
    let id = scene.board.to_string();

    scene
        .engine
        .execute_command(&CommandSender::Console, &["board", "remove", "not-a-uuid"]);
    scene.engine.execute_command(
        &CommandSender::Console,
        &["board", "remove", "00000000-0000-0000-0000-0000000000ff"],
    );
    assert_eq!(scene.engine.boards().len(), 1);

    scene
        .engine
        .execute_command(&CommandSender::Console, &["board", "remove", id.as_str()]);
    assert!(scene.engine.boards().is_empty());

    assert_eq!(
        scene.engine.host().console_messages(),
        vec![
            lang::ERROR_BOARD_REMOVE,
            lang::ERROR_BOARD_REMOVE,
            lang::SUCCESS_BOARD_REMOVE
        ]
    );
}
