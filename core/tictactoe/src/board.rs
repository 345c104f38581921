//! 棋盤實體：錨點 + 九格的空間查詢

use crate::domain::alias::BoardId;
use crate::domain::core_types::{
    BlockPos, LogicalPosition, Orientation, SlotContent, SoundCue, WorldVector,
};
use crate::host::{SlotHandle, SlotHost, SlotId};
use crate::logic::geometry;
use crate::scheduler::{Scheduler, Task};
use serde::{Deserialize, Serialize};

/// 以中央格子為錨點的 3x3 棋盤
///
/// 建立後錨點不再改變；朝向每次都從宿主重新讀取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    center: WorldVector,
}

impl Board {
    pub fn new(id: BoardId, center: WorldVector) -> Self {
        Self { id, center }
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn center(&self) -> &WorldVector {
        &self.center
    }

    pub fn anchor_block(&self) -> BlockPos {
        self.center.block()
    }

    pub fn orientation<S: SlotHost + ?Sized>(&self, slots: &S) -> Option<Orientation> {
        geometry::anchor_orientation(&self.center, slots)
    }

    pub fn resolve_cell<S: SlotHost + ?Sized>(
        &self,
        position: LogicalPosition,
        slots: &S,
    ) -> Option<SlotHandle> {
        geometry::resolve_cell(&self.center, position, slots)
    }

    pub fn position_of<S: SlotHost + ?Sized>(
        &self,
        slot: SlotId,
        slots: &S,
    ) -> Option<LogicalPosition> {
        geometry::position_of(&self.center, slot, slots)
    }

    /// 所有解析得到的格子，依掃描順序
    pub fn cells<S: SlotHost + ?Sized>(&self, slots: &S) -> Vec<(LogicalPosition, SlotHandle)> {
        LogicalPosition::ALL
            .into_iter()
            .filter_map(|position| {
                self.resolve_cell(position, slots)
                    .map(|handle| (position, handle))
            })
            .collect()
    }

    /// 方塊是否為本棋盤的某一格
    pub fn position_at<S: SlotHost + ?Sized>(
        &self,
        block: &BlockPos,
        slots: &S,
    ) -> Option<LogicalPosition> {
        if self.center.world != block.world {
            return None;
        }
        self.cells(slots)
            .into_iter()
            .find(|(_, handle)| handle.location.block() == *block)
            .map(|(position, _)| position)
    }

    /// 九格皆存在，且只顯示空白或遊戲標記
    pub fn is_intact<S: SlotHost + ?Sized>(&self, slots: &S) -> bool {
        LogicalPosition::ALL.into_iter().all(|position| {
            self.resolve_cell(position, slots)
                .and_then(|handle| slots.content(handle.id))
                .is_some_and(|content| content.is_clean())
        })
    }

    /// 到最近一格的距離；不同世界或無法解析時回傳 `None`
    pub fn distance_to<S: SlotHost + ?Sized>(&self, point: &WorldVector, slots: &S) -> Option<f64> {
        if self.center.world != point.world {
            return None;
        }
        self.cells(slots)
            .iter()
            .filter_map(|(_, handle)| handle.location.distance(point))
            .min_by(f64::total_cmp)
    }

    /// 排程在下一 tick 將九格設為同一內容
    ///
    /// 格子在排程時解析，無法解析的格子略過。
    pub fn fill<S, T>(&self, content: &SlotContent, slots: &S, scheduler: &mut T)
    where
        S: SlotHost + ?Sized,
        T: Scheduler + ?Sized,
    {
        for position in LogicalPosition::ALL {
            match self.resolve_cell(position, slots) {
                Some(handle) => {
                    scheduler.run_next_tick(Task::SetSlot {
                        slot: handle.id,
                        content: content.clone(),
                    });
                }
                None => {
                    tracing::debug!(board = %self.id, %position, "格子無法解析，略過寫入");
                }
            }
        }
    }

    /// 在錨點播放音效
    pub fn play_sound<S: SlotHost + ?Sized>(&self, slots: &mut S, cue: SoundCue) {
        slots.play_sound(&self.center, cue);
    }
}
