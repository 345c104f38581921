//! 置頂狀態列
//!
//! 宿主的 action bar 訊息只會顯示數秒，這裡記住每位玩家最後的狀態文字，
//! 由週期任務 [`crate::scheduler::Task::RefreshSticky`] 重送。

use crate::domain::alias::PlayerId;
use crate::host::{Notifier, PlayerDirectory};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct StickyStatus {
    messages: HashMap<PlayerId, String>,
}

impl StickyStatus {
    /// 設定並立即送出
    pub fn send<N: Notifier + ?Sized>(&mut self, notifier: &mut N, player: PlayerId, text: &str) {
        self.messages.insert(player, text.to_string());
        notifier.send_action_bar(player, text);
    }

    /// 移除並送出空白狀態
    pub fn clear<N: Notifier + ?Sized>(&mut self, notifier: &mut N, player: PlayerId) {
        if self.messages.remove(&player).is_some() {
            notifier.send_action_bar(player, "");
        }
    }

    pub fn get(&self, player: PlayerId) -> Option<&str> {
        self.messages.get(&player).map(String::as_str)
    }

    /// 重送所有狀態；離線玩家直接移除
    pub fn refresh<H>(&mut self, host: &mut H)
    where
        H: Notifier + PlayerDirectory + ?Sized,
    {
        self.messages.retain(|player, _| host.is_online(*player));
        for (player, text) in &self.messages {
            host.send_action_bar(*player, text);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
