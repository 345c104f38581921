use crate::board::Board;
use crate::domain::alias::BoardId;
use crate::domain::core_types::{BlockPos, LogicalPosition, WorldVector};
use crate::error::{BoardError, Result};
use crate::host::SlotHost;
use std::collections::BTreeMap;

/// 所有棋盤，依 ID 排序以確保掃描順序固定
#[derive(Debug, Clone, Default)]
pub struct BoardRegistry {
    boards: BTreeMap<BoardId, Board>,
}

impl BoardRegistry {
    pub fn from_boards(boards: BTreeMap<BoardId, Board>) -> Self {
        Self { boards }
    }

    pub fn boards(&self) -> &BTreeMap<BoardId, Board> {
        &self.boards
    }

    pub fn get(&self, id: &BoardId) -> Option<&Board> {
        self.boards.get(id)
    }

    pub fn contains(&self, id: &BoardId) -> bool {
        self.boards.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    pub fn ids(&self) -> Vec<BoardId> {
        self.boards.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// 檢查後加入；已有相同 ID 時覆蓋
    pub fn insert<S: SlotHost + ?Sized>(&mut self, board: Board, slots: &S) -> Result<()> {
        self.check_candidate(&board, slots)?;
        self.boards.insert(board.id(), board);
        Ok(())
    }

    pub fn remove(&mut self, id: &BoardId) -> Option<Board> {
        self.boards.remove(id)
    }

    /// 方塊所在的棋盤格子（第一個符合者）
    pub fn cell_at<S: SlotHost + ?Sized>(
        &self,
        block: &BlockPos,
        slots: &S,
    ) -> Option<(&Board, LogicalPosition)> {
        self.boards.values().find_map(|board| {
            board
                .position_at(block, slots)
                .map(|position| (board, position))
        })
    }

    /// 方塊所在的棋盤
    pub fn board_at<S: SlotHost + ?Sized>(&self, block: &BlockPos, slots: &S) -> Option<&Board> {
        self.cell_at(block, slots).map(|(board, _)| board)
    }

    /// 半徑內距離最近的棋盤
    ///
    /// 以各格子位置計算距離；其他世界的棋盤直接略過。
    pub fn nearest_board<S: SlotHost + ?Sized>(
        &self,
        point: &WorldVector,
        radius: f64,
        slots: &S,
    ) -> Option<&Board> {
        self.boards
            .values()
            .filter_map(|board| board.distance_to(point, slots).map(|d| (board, d)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(board, _)| board)
    }

    /// 新棋盤是否可以加入：九格完整，且錨點不屬於其他棋盤
    pub fn check_candidate<S: SlotHost + ?Sized>(&self, board: &Board, slots: &S) -> Result<()> {
        if !board.is_intact(slots) {
            return Err(BoardError::InvalidGrid { board: board.id() }.into());
        }
        match self.board_at(&board.anchor_block(), slots) {
            Some(other) if other.id() != board.id() => Err(BoardError::AnchorOccupied {
                board: board.id(),
                other: other.id(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// 移除所有無效的棋盤，回傳被移除的棋盤
    ///
    /// 依 ID 順序逐一檢查，重疊時保留較早通過的棋盤。
    pub fn validate<S: SlotHost + ?Sized>(&mut self, slots: &S) -> Vec<Board> {
        let mut kept = BoardRegistry::default();
        let mut removed = Vec::new();

        for (id, board) in std::mem::take(&mut self.boards) {
            match kept.check_candidate(&board, slots) {
                Ok(()) => {
                    kept.boards.insert(id, board);
                }
                Err(e) => {
                    tracing::warn!(board = %id, error = %e, "移除無效棋盤");
                    removed.push(board);
                }
            }
        }

        *self = kept;
        removed
    }
}
