//! 棋盤與遊戲的註冊表
//!
//! 兩者以 ID 互相參照：每個棋盤恰有一個遊戲，遊戲的棋盤 ID 必定能在
//! [`BoardRegistry`] 中找到。維持這個關係是 `Engine` 的責任。

mod board_registry;
mod game_registry;

pub use board_registry::BoardRegistry;
pub use game_registry::GameRegistry;
