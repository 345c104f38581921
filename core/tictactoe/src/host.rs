//! 宿主環境介面
//!
//! 核心只透過這些 trait 讀寫宿主狀態，不直接接觸宿主的具體型別。
//! 一個宿主 adapter 通常同時實作全部 trait，合併成 [`Host`]。

use crate::domain::alias::PlayerId;
use crate::domain::core_types::{Marker, Orientation, SlotContent, SoundCue, WorldVector};

/// 宿主中格子實體的識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u64);

/// 查詢到的格子實體
#[derive(Debug, Clone, PartialEq)]
pub struct SlotHandle {
    pub id: SlotId,
    /// 實體所在位置
    pub location: WorldVector,
}

/// 物理格子（展示框）存取
pub trait SlotHost {
    /// 世界是否存在（已載入）
    fn has_world(&self, world: &str) -> bool;

    /// 取得位於該位置方塊內的格子
    fn slot_at(&self, location: &WorldVector) -> Option<SlotHandle>;

    /// 格子朝向；格子已消失時回傳 `None`
    fn orientation(&self, slot: SlotId) -> Option<Orientation>;

    /// 格子目前顯示的內容
    fn content(&self, slot: SlotId) -> Option<SlotContent>;

    /// 設定格子顯示內容，同時清除旋轉
    fn set_content(&mut self, slot: SlotId, content: SlotContent);

    /// 在指定位置播放音效
    fn play_sound(&mut self, at: &WorldVector, cue: SoundCue);
}

/// 訊息接收者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Player(PlayerId),
    Console,
}

/// 訊息發送
pub trait Notifier {
    /// 聊天訊息
    fn send_message(&mut self, to: Recipient, text: &str);

    /// 一次性的狀態列（action bar）訊息
    fn send_action_bar(&mut self, to: PlayerId, text: &str);
}

/// 玩家資訊查詢
pub trait PlayerDirectory {
    /// 顯示名稱（離線玩家也可能查得到）
    fn display_name(&self, player: PlayerId) -> Option<String>;

    fn is_online(&self, player: PlayerId) -> bool;

    /// 對玩家本人播放音效
    fn play_player_sound(&mut self, player: PlayerId, cue: SoundCue);
}

/// 顏色選擇介面
///
/// 選擇結果由 UI 稍後透過 `Engine::select_marker` 回呼。
pub trait MarkerMenu {
    fn present_marker_choice(&mut self, player: PlayerId, title: &str, options: &[Marker]);
}

/// 完整的宿主環境
pub trait Host: SlotHost + Notifier + PlayerDirectory + MarkerMenu {}

impl<T: SlotHost + Notifier + PlayerDirectory + MarkerMenu> Host for T {}
