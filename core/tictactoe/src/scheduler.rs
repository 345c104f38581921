//! 排程：延遲寫入、定時任務與取消
//!
//! 任務以 [`Task`] 描述（只攜帶 ID），執行時才讀取當下的遊戲狀態。

use crate::domain::alias::{GameId, Ticks};
use crate::domain::core_types::SlotContent;
use crate::host::SlotId;
use std::collections::BTreeMap;

/// 排程任務
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// 下一 tick 才寫入格子顯示
    SetSlot { slot: SlotId, content: SlotContent },
    /// 回合結束後回到等待階段
    ReturnToLobby { game: GameId },
    /// 結束動畫：閃爍獲勝連線
    Strobe { game: GameId },
    /// 重送置頂狀態列訊息
    RefreshSticky,
}

/// 任務 handle；取消已取消或不存在的 handle 不做任何事
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

/// 排程介面
pub trait Scheduler {
    /// 下一 tick 執行一次
    fn run_next_tick(&mut self, task: Task) -> TaskHandle;

    /// `delay` tick 後執行一次
    fn run_after_delay(&mut self, task: Task, delay: Ticks) -> TaskHandle;

    /// 下一 tick 開始，每 `interval` tick 執行一次
    fn run_periodic(&mut self, task: Task, interval: Ticks) -> TaskHandle;

    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone)]
struct Entry {
    task: Task,
    due: Ticks,
    interval: Option<Ticks>,
}

/// 以 tick 驅動的排程器
///
/// 宿主每 tick 呼叫 [`TickScheduler::advance`]，再反覆 [`TickScheduler::pop_due`]
/// 取出到期任務；同一 tick 內前面的任務取消的後續任務不會被取出。
#[derive(Debug, Default)]
pub struct TickScheduler {
    now: Ticks,
    next_handle: u64,
    entries: BTreeMap<TaskHandle, Entry>,
}

impl TickScheduler {
    pub fn now(&self) -> Ticks {
        self.now
    }

    /// 前進一 tick
    pub fn advance(&mut self) {
        self.now += 1;
    }

    /// 取出一個到期任務（依到期 tick、再依 handle 排序）
    ///
    /// 週期任務取出後自動排入下一次。
    pub fn pop_due(&mut self) -> Option<(TaskHandle, Task)> {
        let handle = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due <= self.now)
            .min_by_key(|(handle, entry)| (entry.due, **handle))
            .map(|(handle, _)| *handle)?;

        match self.entries.get(&handle).and_then(|entry| entry.interval) {
            Some(interval) => {
                let entry = self.entries.get_mut(&handle)?;
                entry.due = self.now + interval.max(1);
                Some((handle, entry.task.clone()))
            }
            None => self.entries.remove(&handle).map(|entry| (handle, entry.task)),
        }
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// 尚未執行（或週期中）的任務數
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    fn schedule(&mut self, task: Task, delay: Ticks, interval: Option<Ticks>) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.entries.insert(
            handle,
            Entry {
                task,
                due: self.now + delay.max(1),
                interval,
            },
        );
        handle
    }
}

impl Scheduler for TickScheduler {
    fn run_next_tick(&mut self, task: Task) -> TaskHandle {
        self.schedule(task, 1, None)
    }

    fn run_after_delay(&mut self, task: Task, delay: Ticks) -> TaskHandle {
        self.schedule(task, delay, None)
    }

    fn run_periodic(&mut self, task: Task, interval: Ticks) -> TaskHandle {
        self.schedule(task, 1, Some(interval))
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.remove(&handle);
    }
}
