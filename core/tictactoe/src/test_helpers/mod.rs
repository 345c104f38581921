//! 測試輔助：記憶體宿主與記憶體棋盤儲存
//!
//! 需啟用 `test-helpers` feature。

use crate::board::Board;
use crate::domain::alias::{BoardId, PlayerId};
use crate::domain::core_types::{
    BlockPos, LogicalPosition, Marker, Orientation, SlotContent, SoundCue, WorldVector,
};
use crate::error::{LoadError, Result};
use crate::host::{MarkerMenu, Notifier, PlayerDirectory, Recipient, SlotHandle, SlotHost, SlotId};
use crate::logic::geometry::cell_offset;
use crate::store::BoardStore;
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct MemorySlot {
    location: WorldVector,
    orientation: Orientation,
    content: SlotContent,
}

#[derive(Debug, Clone)]
struct MemoryPlayer {
    name: String,
    online: bool,
}

/// 播放過的音效
#[derive(Debug, Clone, PartialEq)]
pub enum PlayedSound {
    At(WorldVector, SoundCue),
    ToPlayer(PlayerId, SoundCue),
}

/// 以記憶體模擬的宿主環境
///
/// 格子以所在方塊為索引；發出的訊息、狀態列、音效與選單都記錄下來供斷言。
#[derive(Debug, Default)]
pub struct MemoryHost {
    worlds: HashSet<String>,
    slots: HashMap<SlotId, MemorySlot>,
    by_block: HashMap<BlockPos, SlotId>,
    next_slot: u64,
    players: HashMap<PlayerId, MemoryPlayer>,
    pub messages: Vec<(Recipient, String)>,
    pub action_bars: Vec<(PlayerId, String)>,
    pub sounds: Vec<PlayedSound>,
    pub menus: Vec<(PlayerId, Vec<Marker>)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已載入指定世界的宿主
    pub fn with_world(world: &str) -> Self {
        let mut host = Self::new();
        host.add_world(world);
        host
    }

    pub fn add_world(&mut self, world: &str) {
        self.worlds.insert(world.to_string());
    }

    pub fn unload_world(&mut self, world: &str) {
        self.worlds.remove(world);
    }

    /// 在方塊中央放一個空格子
    pub fn place_slot(&mut self, block: &BlockPos, orientation: Orientation) -> SlotHandle {
        self.next_slot += 1;
        let id = SlotId(self.next_slot);
        let location = WorldVector::new(
            block.world.clone(),
            f64::from(block.x) + 0.5,
            f64::from(block.y) + 0.5,
            f64::from(block.z) + 0.5,
        );
        self.slots.insert(
            id,
            MemorySlot {
                location: location.clone(),
                orientation,
                content: SlotContent::Empty,
            },
        );
        self.by_block.insert(block.clone(), id);
        SlotHandle { id, location }
    }

    pub fn remove_slot(&mut self, block: &BlockPos) {
        if let Some(id) = self.by_block.remove(block) {
            self.slots.remove(&id);
        }
    }

    pub fn set_orientation(&mut self, slot: SlotId, orientation: Orientation) {
        if let Some(entry) = self.slots.get_mut(&slot) {
            entry.orientation = orientation;
        }
    }

    /// 依朝向在錨點周圍放置九個格子，回傳依掃描順序排列的 handle
    pub fn build_grid(&mut self, center: &BlockPos, orientation: Orientation) -> Vec<SlotHandle> {
        LogicalPosition::ALL
            .into_iter()
            .map(|position| {
                let offset = cell_offset(orientation, position);
                let block = center.relative(offset.dx, offset.dy, offset.dz);
                self.place_slot(&block, orientation)
            })
            .collect()
    }

    /// 方塊上的格子
    pub fn slot_in(&self, block: &BlockPos) -> Option<SlotHandle> {
        self.slot_at(&block.to_vector())
    }

    /// 直接讀取方塊上格子的內容
    pub fn content_in(&self, block: &BlockPos) -> Option<SlotContent> {
        let id = self.by_block.get(block)?;
        self.slots.get(id).map(|slot| slot.content.clone())
    }

    pub fn add_player(&mut self, name: &str) -> PlayerId {
        let id = Uuid::new_v4();
        self.players.insert(
            id,
            MemoryPlayer {
                name: name.to_string(),
                online: true,
            },
        );
        id
    }

    pub fn set_online(&mut self, player: PlayerId, online: bool) {
        if let Some(entry) = self.players.get_mut(&player) {
            entry.online = online;
        }
    }

    /// 玩家收到的聊天訊息
    pub fn messages_to(&self, player: PlayerId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| *to == Recipient::Player(player))
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn console_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| *to == Recipient::Console)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// 玩家是否收過包含 `needle` 的訊息
    pub fn received(&self, player: PlayerId, needle: &str) -> bool {
        self.messages_to(player)
            .iter()
            .any(|text| text.contains(needle))
    }

    pub fn last_action_bar(&self, player: PlayerId) -> Option<&str> {
        self.action_bars
            .iter()
            .rev()
            .find(|(to, _)| *to == player)
            .map(|(_, text)| text.as_str())
    }

    pub fn clear_outbox(&mut self) {
        self.messages.clear();
        self.action_bars.clear();
        self.sounds.clear();
        self.menus.clear();
    }
}

impl SlotHost for MemoryHost {
    fn has_world(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    fn slot_at(&self, location: &WorldVector) -> Option<SlotHandle> {
        if !self.has_world(&location.world) {
            return None;
        }
        let id = *self.by_block.get(&location.block())?;
        let slot = self.slots.get(&id)?;
        Some(SlotHandle {
            id,
            location: slot.location.clone(),
        })
    }

    fn orientation(&self, slot: SlotId) -> Option<Orientation> {
        self.slots.get(&slot).map(|slot| slot.orientation)
    }

    fn content(&self, slot: SlotId) -> Option<SlotContent> {
        self.slots.get(&slot).map(|slot| slot.content.clone())
    }

    fn set_content(&mut self, slot: SlotId, content: SlotContent) {
        if let Some(entry) = self.slots.get_mut(&slot) {
            entry.content = content;
        }
    }

    fn play_sound(&mut self, at: &WorldVector, cue: SoundCue) {
        self.sounds.push(PlayedSound::At(at.clone(), cue));
    }
}

impl Notifier for MemoryHost {
    fn send_message(&mut self, to: Recipient, text: &str) {
        self.messages.push((to, text.to_string()));
    }

    fn send_action_bar(&mut self, to: PlayerId, text: &str) {
        self.action_bars.push((to, text.to_string()));
    }
}

impl PlayerDirectory for MemoryHost {
    fn display_name(&self, player: PlayerId) -> Option<String> {
        self.players.get(&player).map(|entry| entry.name.clone())
    }

    fn is_online(&self, player: PlayerId) -> bool {
        self.players.get(&player).is_some_and(|entry| entry.online)
    }

    fn play_player_sound(&mut self, player: PlayerId, cue: SoundCue) {
        self.sounds.push(PlayedSound::ToPlayer(player, cue));
    }
}

impl MarkerMenu for MemoryHost {
    fn present_marker_choice(&mut self, player: PlayerId, _title: &str, options: &[Marker]) {
        self.menus.push((player, options.to_vec()));
    }
}

/// 以記憶體模擬的棋盤儲存
#[derive(Debug, Default)]
pub struct MemoryBoardStore {
    pub boards: BTreeMap<BoardId, Board>,
    pub save_count: usize,
    /// 為 `true` 時載入回傳錯誤
    pub fail_load: bool,
}

impl MemoryBoardStore {
    pub fn with_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        Self {
            boards: boards.into_iter().map(|board| (board.id(), board)).collect(),
            ..Self::default()
        }
    }
}

impl BoardStore for MemoryBoardStore {
    fn load_boards(&mut self) -> Result<BTreeMap<BoardId, Board>> {
        if self.fail_load {
            return Err(LoadError::Io {
                path: "memory".to_string(),
                reason: "載入失敗".to_string(),
            }
            .into());
        }
        Ok(self.boards.clone())
    }

    fn save_boards(&mut self, boards: &BTreeMap<BoardId, Board>) -> Result<()> {
        self.boards = boards.clone();
        self.save_count += 1;
        Ok(())
    }
}
