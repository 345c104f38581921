//! 遊戲常數定義

use crate::domain::alias::Ticks;

/// 宿主環境每秒 tick 數
pub const TICKS_PER_SECOND: Ticks = 20;

/// 棋盤格子總數（3x3）
pub const CELL_COUNT: usize = 9;

/// 每局座位數
pub const SEAT_COUNT: usize = 2;

/// 落子音效音高
pub const TURN_SOUND_PITCH: u8 = 2;

/// 顏色選擇成功音效音高
pub const ACCEPT_SOUND_PITCH: u8 = 2;

/// 顏色選擇失敗音效音高
pub const REJECT_SOUND_PITCH: u8 = 1;

/// 方塊破壞保護檢查的水平相鄰方向（北、南、西、東）
pub const HORIZONTAL_NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
