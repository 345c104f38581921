//! 井字棋核心函式庫
//!
//! 棋盤由宿主世界中 3x3 的展示框組成，以中央格子為錨點。此函式庫包含：
//! - 空間定址（錨點 + 朝向 → 九格位置、棋盤查詢與驗證）
//! - 遊戲狀態機（等待、進行、結束、回合與勝負判定）
//! - 宿主事件與指令的處理
//!
//! 宿主只需實作 [`host::Host`] 與 [`store::BoardStore`]，再建立 [`Engine`]。

pub mod board;
pub mod command;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod game;
pub mod host;
pub mod lang;
pub mod logic;
pub mod registry;
pub mod scheduler;
pub mod sticky;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// 重新導出常用類型
pub use board::Board;
pub use config::MainConfig;
pub use engine::Engine;
pub use engine::events::Hand;
pub use error::{Error, Result};
pub use game::Game;
