//! 棋盤持久化（boards.json）

use crate::board::Board;
use crate::config::io_error;
use crate::domain::alias::BoardId;
use crate::error::{Context, LoadError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 棋盤檔案名稱
pub const BOARDS_FILE: &str = "boards.json";

/// 持久化協作者
pub trait BoardStore {
    fn load_boards(&mut self) -> Result<BTreeMap<BoardId, Board>>;

    fn save_boards(&mut self, boards: &BTreeMap<BoardId, Board>) -> Result<()>;
}

/// 以 JSON 物件儲存：棋盤 ID → 棋盤
#[derive(Debug, Clone)]
pub struct JsonBoardStore {
    path: PathBuf,
}

impl JsonBoardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 在資料目錄下使用預設檔名
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(BOARDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn boards_from_json(json: &str) -> Result<BTreeMap<BoardId, Board>> {
    serde_json::from_str(json).map_err(|e| {
        LoadError::DeserializeError {
            format: BOARDS_FILE.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

pub fn boards_to_json(boards: &BTreeMap<BoardId, Board>) -> Result<String> {
    serde_json::to_string_pretty(boards).map_err(|e| {
        LoadError::SerializeError {
            format: BOARDS_FILE.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

impl BoardStore for JsonBoardStore {
    /// 檔案不存在時視為沒有棋盤
    fn load_boards(&mut self) -> Result<BTreeMap<BoardId, Board>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| io_error(&self.path, e))?;
        let boards = boards_from_json(&content)
            .context(format!("載入棋盤檔案 {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), count = boards.len(), "已載入棋盤");
        Ok(boards)
    }

    fn save_boards(&mut self, boards: &BTreeMap<BoardId, Board>) -> Result<()> {
        let content = boards_to_json(boards)?;
        std::fs::write(&self.path, content).map_err(|e| io_error(&self.path, e))?;
        tracing::info!(path = %self.path.display(), count = boards.len(), "已儲存棋盤");
        Ok(())
    }
}
