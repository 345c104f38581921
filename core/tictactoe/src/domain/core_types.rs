//! 基本資料類型定義

use crate::domain::alias::{BlockCoord, WorldName};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

// ============================================================================
// 方位與格子位置
// ============================================================================

/// 錨點物件朝向的水平方向，決定格子軸向如何對應到世界軸向
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

/// 格子的列（垂直方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Row {
    Top,
    Middle,
    Bottom,
}

impl Row {
    /// 垂直位移：上 +1、中 0、下 -1
    pub const fn sign(self) -> i32 {
        match self {
            Row::Top => 1,
            Row::Middle => 0,
            Row::Bottom => -1,
        }
    }
}

/// 格子的欄（水平方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Column {
    Left,
    Middle,
    Right,
}

impl Column {
    /// 沿「右」軸的位移：左 -1、中 0、右 +1
    pub const fn sign(self) -> i32 {
        match self {
            Column::Left => -1,
            Column::Middle => 0,
            Column::Right => 1,
        }
    }
}

/// 定義 3x3 邏輯位置的 macro（單一來源）
///
/// 格式：(variant, Row, Column)
/// 同時產生：
/// - `LogicalPosition` enum
/// - `LogicalPosition::ALL`（固定掃描順序）
/// - `row()` / `column()` / `index()`
macro_rules! define_positions {
    ($(($variant:ident, $row:ident, $column:ident)),* $(,)?) => {
        /// 3x3 棋盤上的邏輯位置
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, Display, EnumIter,
        )]
        pub enum LogicalPosition {
            $($variant,)*
        }

        impl LogicalPosition {
            /// 全部九個位置，由上而下、由左而右
            pub const ALL: [LogicalPosition; 9] = [$(LogicalPosition::$variant,)*];

            pub const fn row(self) -> Row {
                match self {
                    $(LogicalPosition::$variant => Row::$row,)*
                }
            }

            pub const fn column(self) -> Column {
                match self {
                    $(LogicalPosition::$variant => Column::$column,)*
                }
            }
        }
    };
}

define_positions!(
    (TopLeft, Top, Left),
    (TopMiddle, Top, Middle),
    (TopRight, Top, Right),
    (MiddleLeft, Middle, Left),
    (Center, Middle, Middle),
    (MiddleRight, Middle, Right),
    (BottomLeft, Bottom, Left),
    (BottomMiddle, Bottom, Middle),
    (BottomRight, Bottom, Right),
);

impl LogicalPosition {
    /// 在 `ALL` 中的索引（0..9）
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 相對錨點的世界座標位移
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

// ============================================================================
// 世界座標
// ============================================================================

/// 世界中的一個點（世界名稱 + 座標），即錨點 PhysicalAnchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldVector {
    pub world: WorldName,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldVector {
    pub fn new(world: impl Into<WorldName>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// 套用格子位移
    pub fn offset(&self, offset: Offset) -> Self {
        Self {
            world: self.world.clone(),
            x: self.x + f64::from(offset.dx),
            y: self.y + f64::from(offset.dy),
            z: self.z + f64::from(offset.dz),
        }
    }

    /// 對齊到所在方塊
    pub fn block(&self) -> BlockPos {
        BlockPos {
            world: self.world.clone(),
            x: self.x.floor() as BlockCoord,
            y: self.y.floor() as BlockCoord,
            z: self.z.floor() as BlockCoord,
        }
    }

    /// 兩點距離；不同世界回傳 `None`
    pub fn distance(&self, other: &WorldVector) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        Some((dx * dx + dy * dy + dz * dz).sqrt())
    }
}

/// 對齊到方塊的座標，錨點比較一律使用此型別
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub world: WorldName,
    pub x: BlockCoord,
    pub y: BlockCoord,
    pub z: BlockCoord,
}

impl BlockPos {
    /// 相對位移後的方塊
    pub fn relative(&self, dx: BlockCoord, dy: BlockCoord, dz: BlockCoord) -> Self {
        Self {
            world: self.world.clone(),
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// 方塊的最小角座標
    pub fn to_vector(&self) -> WorldVector {
        WorldVector::new(
            self.world.clone(),
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.z),
        )
    }
}

// ============================================================================
// 標記與格子內容
// ============================================================================

/// 玩家可選的標記顏色
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Marker {
    White,
    Orange,
    Magenta,
    Cyan,
    Yellow,
    Lime,
    Pink,
    Red,
    Blue,
}

/// 格子顯示的內容
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotContent {
    Empty,
    /// 等待階段的「加入」標記
    JoinToken,
    Player(Marker),
    /// 非遊戲放置的物品
    Foreign(String),
}

impl SlotContent {
    /// 是否為遊戲自己放置的標記
    pub fn is_game_marker(&self) -> bool {
        matches!(self, SlotContent::JoinToken | SlotContent::Player(_))
    }

    /// 空格或遊戲標記皆視為可用
    pub fn is_clean(&self) -> bool {
        matches!(self, SlotContent::Empty) || self.is_game_marker()
    }
}

/// 音效提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// 音符盒 pling，音高 1~2
    Pling { pitch: u8 },
}

// ============================================================================
// 遊戲狀態
// ============================================================================

/// 遊戲階段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum GamePhase {
    #[default]
    None,
    Waiting,
    Active,
    Finished,
}

/// 座位（玩家 1 / 玩家 2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// 輪替；沒有目前回合時從 1 開始
    pub const fn next(current: Option<Seat>) -> Seat {
        match current {
            Some(seat) => seat.other(),
            None => Seat::One,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_scan_order() {
        assert_eq!(LogicalPosition::ALL[0], LogicalPosition::TopLeft);
        assert_eq!(LogicalPosition::ALL[4], LogicalPosition::Center);
        assert_eq!(LogicalPosition::ALL[8], LogicalPosition::BottomRight);
        for (i, pos) in LogicalPosition::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
    }

    #[test]
    fn test_block_snapping() {
        let v = WorldVector::new("world", 10.5, 64.03, -3.5);
        let block = v.block();
        assert_eq!((block.x, block.y, block.z), (10, 64, -4));
        assert_eq!(block.world, "world");
    }

    #[test]
    fn test_distance_across_worlds() {
        let a = WorldVector::new("world", 0.0, 0.0, 0.0);
        let b = WorldVector::new("world", 3.0, 4.0, 0.0);
        let c = WorldVector::new("world_nether", 3.0, 4.0, 0.0);
        assert_eq!(a.distance(&b), Some(5.0));
        assert_eq!(a.distance(&c), None);
    }

    #[test]
    fn test_seat_next() {
        assert_eq!(Seat::next(Some(Seat::One)), Seat::Two);
        assert_eq!(Seat::next(Some(Seat::Two)), Seat::One);
        assert_eq!(Seat::next(None), Seat::One);
    }

    #[test]
    fn test_slot_content_clean() {
        assert!(SlotContent::Empty.is_clean());
        assert!(SlotContent::JoinToken.is_clean());
        assert!(SlotContent::Player(Marker::Red).is_clean());
        assert!(!SlotContent::Foreign("diamond".to_string()).is_clean());
        assert!(!SlotContent::Empty.is_game_marker());
    }
}
