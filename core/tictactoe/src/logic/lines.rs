//! 連線判定與落子紀錄

use crate::domain::alias::PlayerId;
use crate::domain::constants::CELL_COUNT;
use crate::domain::core_types::LogicalPosition;
use crate::error::{BoardError, Result};
use std::collections::HashMap;

use LogicalPosition::*;

/// 一條可獲勝的連線
pub type Line = [LogicalPosition; 3];

/// 所有連線，依固定掃描順序：橫列（上→下）、直行（左→右）、兩條對角線
pub const LINES: [Line; 8] = [
    [TopLeft, TopMiddle, TopRight],
    [MiddleLeft, Center, MiddleRight],
    [BottomLeft, BottomMiddle, BottomRight],
    [TopLeft, MiddleLeft, BottomLeft],
    [TopMiddle, Center, BottomMiddle],
    [TopRight, MiddleRight, BottomRight],
    [TopLeft, Center, BottomRight],
    [TopRight, Center, BottomLeft],
];

/// 落子紀錄：位置 → 佔據的玩家
///
/// 每個位置只能寫入一次，重複寫入回傳錯誤而不覆蓋。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimMap {
    claims: HashMap<LogicalPosition, PlayerId>,
}

impl ClaimMap {
    /// 查詢位置的佔據者
    pub fn owner(&self, position: LogicalPosition) -> Option<PlayerId> {
        self.claims.get(&position).copied()
    }

    pub fn is_claimed(&self, position: LogicalPosition) -> bool {
        self.claims.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.claims.len() == CELL_COUNT
    }

    /// 依掃描順序列出所有紀錄
    pub fn iter(&self) -> impl Iterator<Item = (LogicalPosition, PlayerId)> + '_ {
        LogicalPosition::ALL
            .into_iter()
            .filter_map(|position| self.owner(position).map(|player| (position, player)))
    }

    /// 寫入一筆紀錄
    ///
    /// 若該位置已有紀錄，回傳錯誤。
    pub fn claim(&mut self, position: LogicalPosition, player: PlayerId) -> Result<()> {
        if self.claims.contains_key(&position) {
            return Err(BoardError::CellAlreadyClaimed { position }.into());
        }
        self.claims.insert(position, player);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.claims.clear();
    }
}

/// 找出第一條三格皆被同一玩家佔據的連線
///
/// 未佔據的格子永遠不視為相同。
pub fn find_winning_line(claims: &ClaimMap) -> Option<Line> {
    LINES.into_iter().find(|line| {
        let [a, b, c] = line.map(|position| claims.owner(position));
        matches!((a, b, c), (Some(a), Some(b), Some(c)) if a == b && b == c)
    })
}

/// 和局：沒有連線且九格全滿
pub fn is_tie(claims: &ClaimMap) -> bool {
    find_winning_line(claims).is_none() && claims.is_full()
}
