//! 型別別名

use uuid::Uuid;

/// 棋盤唯一 ID
pub type BoardId = Uuid;

/// 遊戲唯一 ID
pub type GameId = Uuid;

/// 玩家唯一 ID（由宿主環境提供）
pub type PlayerId = Uuid;

/// 宿主世界（維度）名稱
pub type WorldName = String;

/// 方塊座標分量
pub type BlockCoord = i32;

/// 排程 tick 數
pub type Ticks = u64;
