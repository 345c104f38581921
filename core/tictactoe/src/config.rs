//! 主要設定（main.toml）

use crate::domain::alias::Ticks;
use crate::domain::constants::TICKS_PER_SECOND;
use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔名稱
pub const MAIN_CONFIG_FILE: &str = "main.toml";

/// 主要設定，缺少的欄位使用預設值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainConfig {
    /// 啟用方塊保護
    pub block_protection: bool,
    /// 玩家離棋盤太遠時自動離開遊戲
    pub player_move_events: bool,
    pub max_player_board_distance: f64,
    pub end_of_round_seconds: u32,
    /// 結束動畫閃爍間隔
    pub strobe_interval_ticks: Ticks,
    /// 置頂狀態列重送間隔
    pub sticky_refresh_ticks: Ticks,
    /// `board remove` 未指定 ID 時的搜尋半徑
    pub remove_search_radius: f64,
}

impl Default for MainConfig {
    fn default() -> Self {
        Self {
            block_protection: true,
            player_move_events: true,
            max_player_board_distance: 10.0,
            end_of_round_seconds: 3,
            strobe_interval_ticks: 5,
            sticky_refresh_ticks: 40,
            remove_search_radius: 5.0,
        }
    }
}

impl MainConfig {
    pub fn end_of_round_ticks(&self) -> Ticks {
        Ticks::from(self.end_of_round_seconds) * TICKS_PER_SECOND
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            LoadError::DeserializeError {
                format: MAIN_CONFIG_FILE.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            LoadError::SerializeError {
                format: MAIN_CONFIG_FILE.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// 讀取設定檔；檔案不存在時寫入預設設定並回傳
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            let content = config.to_toml_string()?;
            std::fs::write(path, content).map_err(|e| io_error(path, e))?;
            tracing::info!(path = %path.display(), "已建立預設設定檔");
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        Self::from_toml_str(&content)
    }
}

pub(crate) fn io_error(path: &Path, e: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = MainConfig::from_toml_str(
            r#"
            block_protection = false
            end_of_round_seconds = 5
            "#,
        )
        .unwrap();

        assert!(!config.block_protection);
        assert_eq!(config.end_of_round_seconds, 5);
        assert_eq!(config.end_of_round_ticks(), 100);
        assert!(config.player_move_events);
        assert_eq!(config.max_player_board_distance, 10.0);
        assert_eq!(config.strobe_interval_ticks, 5);
    }

    #[test]
    fn test_invalid_config_reports_file() {
        let err = MainConfig::from_toml_str("end_of_round_seconds = \"soon\"").unwrap_err();
        assert!(err.to_string().contains(MAIN_CONFIG_FILE));
    }

    #[test]
    fn test_toml_round_trip_keeps_defaults() {
        let config = MainConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(MainConfig::from_toml_str(&text).unwrap(), config);
    }
}
