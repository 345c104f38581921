//! 錯誤處理系統
//!
//! 解析失敗（找不到錨點、格子）一律以 `None` 表示，不走這裡；
//! 這裡只處理需要回報給呼叫端的錯誤：棋盤驗證、遊戲操作、載入與儲存。

use crate::domain::alias::{BoardId, GameId, PlayerId};
use crate::domain::core_types::{LogicalPosition, Marker};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// 棋盤錯誤
#[derive(Debug, ThisError)]
pub enum BoardError {
    #[error("棋盤 {board} 不是完整的 3x3 格子")]
    InvalidGrid { board: BoardId },
    #[error("棋盤 {board} 的錨點已被棋盤 {other} 佔用")]
    AnchorOccupied { board: BoardId, other: BoardId },
    #[error("棋盤 ID 已存在: {board}")]
    DuplicateId { board: BoardId },
    #[error("找不到棋盤: {board}")]
    BoardNotFound { board: BoardId },
    #[error("位置 {position} 已被佔據，無法重複寫入")]
    CellAlreadyClaimed { position: LogicalPosition },
}

/// 遊戲操作錯誤
#[derive(Debug, ThisError)]
pub enum GameError {
    #[error("玩家 {player} 不在任何遊戲中")]
    NotInGame { player: PlayerId },
    #[error("標記 {marker} 已被另一位玩家使用")]
    MarkerInUse { marker: Marker },
    #[error("遊戲 {game} 目前無法加入")]
    SeatUnavailable { game: GameId },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("讀寫 {path} 失敗: {reason}")]
    Io { path: String, reason: String },
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
    #[error("{format} 序列化失敗: {reason}")]
    SerializeError { format: String, reason: String },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(e.context(context)),
        }
    }
}
