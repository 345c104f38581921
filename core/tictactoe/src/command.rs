//! `/tictactoe` 指令

use crate::domain::alias::PlayerId;
use crate::domain::core_types::WorldVector;
use crate::engine::Engine;
use crate::host::{Host, Recipient};
use crate::lang;
use crate::store::BoardStore;
use uuid::Uuid;

/// 指令名稱
pub const COMMAND_LABEL: &str = "tictactoe";

/// 指令發送者
#[derive(Debug, Clone, PartialEq)]
pub enum CommandSender {
    Console,
    Player {
        id: PlayerId,
        location: WorldVector,
        /// 是否擁有管理權限（tictactoe.admin）
        is_admin: bool,
    },
}

impl CommandSender {
    pub fn is_admin(&self) -> bool {
        match self {
            CommandSender::Console => true,
            CommandSender::Player { is_admin, .. } => *is_admin,
        }
    }

    pub fn recipient(&self) -> Recipient {
        match self {
            CommandSender::Console => Recipient::Console,
            CommandSender::Player { id, .. } => Recipient::Player(*id),
        }
    }
}

/// 解析後的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Leave,
    Help,
    /// `board` 子指令說明
    BoardHelp,
    BoardCreate,
    BoardCancel,
    BoardList,
    /// 移除發送者附近的棋盤
    BoardRemoveNearest,
    /// 依 ID 移除（尚未驗證格式）
    BoardRemove(String),
}

impl Command {
    /// 無法辨識的輸入一律視為 `Help`
    pub fn parse(args: &[&str]) -> Self {
        let is = |index: usize, word: &str| {
            args.get(index)
                .is_some_and(|arg| arg.eq_ignore_ascii_case(word))
        };

        match args.len() {
            1 if is(0, "version") => Command::Version,
            1 if is(0, "leave") => Command::Leave,
            1 if is(0, "board") => Command::BoardHelp,
            2 if is(0, "board") && is(1, "create") => Command::BoardCreate,
            2 if is(0, "board") && is(1, "cancel") => Command::BoardCancel,
            2 if is(0, "board") && is(1, "list") => Command::BoardList,
            2 if is(0, "board") && is(1, "remove") => Command::BoardRemoveNearest,
            3 if is(0, "board") && is(1, "remove") => Command::BoardRemove(args[2].to_string()),
            _ => Command::Help,
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::BoardHelp
                | Command::BoardCreate
                | Command::BoardCancel
                | Command::BoardList
                | Command::BoardRemoveNearest
                | Command::BoardRemove(_)
        )
    }
}

/// Tab 補全
pub fn tab_complete(sender: &CommandSender, args: &[&str]) -> Vec<String> {
    if matches!(sender, CommandSender::Console) {
        return Vec::new();
    }

    let words: &[&str] = match args {
        [_] if sender.is_admin() => &["leave", "version", "help", "board"],
        [_] => &["leave", "version", "help"],
        [first, _] if first.eq_ignore_ascii_case("board") => &["create", "cancel", "list", "remove"],
        _ => &[],
    };
    words.iter().map(|word| word.to_string()).collect()
}

impl<H: Host, S: BoardStore> Engine<H, S> {
    /// 執行指令
    pub fn execute_command(&mut self, sender: &CommandSender, args: &[&str]) {
        let to = sender.recipient();
        let command = Command::parse(args);

        if command.requires_admin() && !sender.is_admin() {
            self.send(to, lang::ERROR_PERMISSION_DENIED);
            self.send_help(sender);
            return;
        }

        match command {
            Command::Version => {
                self.send(to, &lang::command_version(env!("CARGO_PKG_VERSION")));
            }
            Command::Help => self.send_help(sender),
            Command::BoardHelp => {
                self.send(to, lang::COMMAND_HELP_TITLE);
                for (usage, description) in [
                    ("board list", "View a list of known boards"),
                    (
                        "board remove [id]",
                        "Removes a board (either at location or by specifying an id)",
                    ),
                    ("board create", "Creates a board"),
                    ("board cancel", "Cancel board creation"),
                ] {
                    self.send(
                        to,
                        &lang::command_help_entry(COMMAND_LABEL, usage, description),
                    );
                }
            }
            Command::Leave => {
                let Some((player, _)) = self.require_player(sender) else {
                    return;
                };
                if self.leave_game(player).is_err() {
                    self.send(to, lang::ERROR_NOT_IN_GAME);
                }
            }
            Command::BoardCreate => {
                let Some((player, _)) = self.require_player(sender) else {
                    return;
                };
                if self.begin_board_creation(player) {
                    self.send(to, lang::COMMAND_BOARD_CREATE_START);
                    self.send(to, &lang::command_board_create_hint(COMMAND_LABEL));
                }
            }
            Command::BoardCancel => {
                let Some((player, _)) = self.require_player(sender) else {
                    return;
                };
                if self.cancel_board_creation(player) {
                    self.send(to, lang::COMMAND_BOARD_CREATE_CANCEL);
                }
            }
            Command::BoardList => {
                let lines: Vec<String> = self
                    .boards()
                    .iter()
                    .map(|board| {
                        lang::command_board_list_entry(
                            &board.anchor_block(),
                            &board.id().to_string(),
                        )
                    })
                    .collect();
                self.send(to, &lang::command_board_list_title(lines.len()));
                for line in lines {
                    self.send(to, &line);
                }
            }
            Command::BoardRemoveNearest => {
                let Some((_, location)) = self.require_player(sender) else {
                    return;
                };
                let nearest = self
                    .boards()
                    .nearest_board(&location, self.config().remove_search_radius, self.host())
                    .map(|board| board.id());
                self.finish_remove(to, nearest);
            }
            Command::BoardRemove(input) => {
                let id = Uuid::parse_str(&input)
                    .ok()
                    .filter(|id| self.boards().contains(id));
                self.finish_remove(to, id);
            }
        }
    }

    fn finish_remove(&mut self, to: Recipient, board: Option<Uuid>) {
        match board.map(|id| self.remove_board(id)) {
            Some(Ok(())) => self.send(to, lang::SUCCESS_BOARD_REMOVE),
            _ => self.send(to, lang::ERROR_BOARD_REMOVE),
        }
    }

    /// 只有玩家能執行的指令；主控台會收到錯誤訊息
    fn require_player(&mut self, sender: &CommandSender) -> Option<(PlayerId, WorldVector)> {
        match sender {
            CommandSender::Player { id, location, .. } => Some((*id, location.clone())),
            CommandSender::Console => {
                self.send(Recipient::Console, lang::ERROR_NOT_PLAYER);
                None
            }
        }
    }

    fn send_help(&mut self, sender: &CommandSender) {
        let to = sender.recipient();
        self.send(to, lang::COMMAND_HELP_TITLE);

        let mut entries = Vec::new();
        if sender.is_admin() {
            entries.push(("board", "Access board specific commands"));
        }
        entries.extend([
            ("leave", "Leave the current game"),
            ("version", "View plugin information"),
            ("help", "View plugin commands"),
        ]);
        for (usage, description) in entries {
            self.send(
                to,
                &lang::command_help_entry(COMMAND_LABEL, usage, description),
            );
        }
    }
}
