//! 玩家看到的訊息範本

use crate::domain::alias::PlayerId;
use crate::domain::core_types::BlockPos;
use crate::host::{Notifier, PlayerDirectory, Recipient};

pub const PLUGIN_PREFIX: &str = "TicTacToe » ";
pub const ACTIONBAR_PREFIX: &str = "TicTacToe | ";

pub const COMMAND_HELP_TITLE: &str = "Command Help:";
pub const COMMAND_BOARD_CREATE_CANCEL: &str = "Board creation cancelled.";
pub const COMMAND_BOARD_CREATE_START: &str =
    "Board creation begun. Right click on the middle of a 3x3 grid of item frames.";

pub const EVENT_GAME_START: &str = "The game has begun!";
pub const EVENT_GAME_WAITING: &str = "Waiting for a second player to join...";

pub const ERROR_PERMISSION_DENIED: &str =
    "Error: You do not have permission to perform this action.";
pub const ERROR_NOT_PLAYER: &str = "Error: You must be a player to perform this action.";
pub const ERROR_BOARD_CREATE: &str =
    "Error: Unable to create board, is this the middle of a 3x3 grid of empty item frames?";
pub const ERROR_BLOCK_BREAK_DENY: &str =
    "Error: You are unable to break this block as it will destroy the board.";
pub const ERROR_BLOCK_PLACE_DENY: &str =
    "Error: You are unable to place this block as it will destroy the board.";
pub const ERROR_BOARD_REMOVE: &str = "Error: No nearby boards found!";
pub const ERROR_NOT_IN_GAME: &str = "Error: You are not in an active game.";
pub const ERROR_GAME_JOIN_FAIL: &str = "Error: You are unable to join this game!";
pub const ERROR_MARKER_IN_USE: &str = "Error: This colour is in use by the other player!";
pub const ERROR_NOT_YOUR_TURN: &str = "Error: It is not your turn!";

pub const SUCCESS_BOARD_CREATE: &str = "Success: Board created, and ready to be used!";
pub const SUCCESS_BOARD_REMOVE: &str = "Success: Nearest board removed.";
pub const SUCCESS_MARKER_SELECTED: &str = "Success: Your colour has been chosen.";

pub const MENU_MARKER_SELECTION_TITLE: &str = "Choose your colour!";

/// 和局時顯示的「獲勝者」名稱
pub const TIE_NAME: &str = "Tie!";

pub fn command_version(version: &str) -> String {
    format!("TicTacToe version {version}.")
}

pub fn command_help_entry(label: &str, usage: &str, description: &str) -> String {
    format!("/{label} {usage} - {description}")
}

pub fn command_board_create_hint(label: &str) -> String {
    format!("To cancel, run /{label} board cancel.")
}

pub fn command_board_list_title(count: usize) -> String {
    format!("Board List ({count}):")
}

pub fn command_board_list_entry(block: &BlockPos, id: &str) -> String {
    format!(" - {}, {}, {}, ({id})", block.x, block.y, block.z)
}

pub fn event_game_join(name: &str) -> String {
    format!("{name} has joined this game.")
}

pub fn event_game_leave(name: &str) -> String {
    format!("{name} has left this game.")
}

pub fn event_game_winner(name: &str) -> String {
    format!("Game Over! Winner: {name}")
}

pub fn status_waiting() -> String {
    format!("{ACTIONBAR_PREFIX}Waiting for players...")
}

pub fn status_turn(name: &str) -> String {
    format!("{ACTIONBAR_PREFIX}Current Turn: {name}")
}

pub fn status_winner(name: &str) -> String {
    format!("{ACTIONBAR_PREFIX}Winner: {name}")
}

/// 發送訊息；玩家會加上插件前綴，主控台則不加
pub fn send<N: Notifier + ?Sized>(notifier: &mut N, to: Recipient, message: &str) {
    match to {
        Recipient::Player(_) => notifier.send_message(to, &format!("{PLUGIN_PREFIX}{message}")),
        Recipient::Console => notifier.send_message(to, message),
    }
}

/// 玩家顯示名稱；查不到時使用 ID
pub fn display_name<P: PlayerDirectory + ?Sized>(players: &P, player: PlayerId) -> String {
    players
        .display_name(player)
        .unwrap_or_else(|| player.to_string())
}
