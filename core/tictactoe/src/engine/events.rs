//! 宿主事件處理
//!
//! 回傳 `bool` 的處理函數表示宿主是否應取消原本的事件。

use super::Engine;
use crate::board::Board;
use crate::command::COMMAND_LABEL;
use crate::domain::alias::PlayerId;
use crate::domain::constants::HORIZONTAL_NEIGHBOURS;
use crate::domain::core_types::{BlockPos, GamePhase, WorldVector};
use crate::host::{Host, Recipient, SlotHandle};
use crate::lang;
use crate::logic::id_generator::generate_unique_id;
use crate::store::BoardStore;

/// 觸發互動的手
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

impl<H: Host, S: BoardStore> Engine<H, S> {
    /// 玩家右鍵點擊格子
    pub fn on_slot_interact(&mut self, player: PlayerId, slot: &SlotHandle, hand: Hand) -> bool {
        if hand == Hand::Off {
            return false;
        }

        if self.is_board_creator(player) {
            self.try_create_board(player, &slot.location);
            return true;
        }

        let Some(board) = self.boards.board_at(&slot.location.block(), &self.host) else {
            return false;
        };
        let board_id = board.id();
        let position = board.position_of(slot.id, &self.host);

        let (games, mut ctx) = self.parts();
        let Some((game_id, phase)) = games
            .game_for_board(board_id, &ctx)
            .map(|game| (game.id(), game.phase()))
        else {
            lang::send(
                &mut *ctx.host,
                Recipient::Player(player),
                lang::ERROR_GAME_JOIN_FAIL,
            );
            return true;
        };

        match games.game_for_player(player).map(|game| game.id()) {
            None if phase == GamePhase::Waiting => {
                if let Err(e) = games.try_join(player, board_id, &mut ctx) {
                    tracing::debug!(%player, error = %e, "加入遊戲失敗");
                    lang::send(
                        &mut *ctx.host,
                        Recipient::Player(player),
                        lang::ERROR_GAME_JOIN_FAIL,
                    );
                }
            }
            None => {}
            Some(current) if current == game_id && phase == GamePhase::Active => {
                let Some(game) = games.get_mut(game_id) else {
                    return true;
                };
                if game.current_player() != Some(player) {
                    lang::send(
                        &mut *ctx.host,
                        Recipient::Player(player),
                        lang::ERROR_NOT_YOUR_TURN,
                    );
                } else if let Some(position) = position {
                    game.play_turn(position, &mut ctx);
                }
            }
            Some(_) => {}
        }
        true
    }

    fn try_create_board(&mut self, player: PlayerId, location: &WorldVector) {
        let id = generate_unique_id(&mut self.used_board_ids);
        let board = Board::new(id, location.block().to_vector());

        match self.add_board(board) {
            Ok(_) => {
                self.board_creators.remove(&player);
                self.send(Recipient::Player(player), lang::SUCCESS_BOARD_CREATE);
            }
            Err(e) => {
                tracing::debug!(%player, error = %e, "建立棋盤失敗");
                self.used_board_ids.remove(&id);
                self.send(Recipient::Player(player), lang::ERROR_BOARD_CREATE);
                self.send(
                    Recipient::Player(player),
                    &lang::command_board_create_hint(COMMAND_LABEL),
                );
            }
        }
    }

    pub fn on_player_quit(&mut self, player: PlayerId) {
        self.board_creators.remove(&player);
        self.leave_if_playing(player);
    }

    pub fn on_player_death(&mut self, player: PlayerId) {
        self.leave_if_playing(player);
    }

    /// 遊戲中的玩家離棋盤太遠時自動離開
    pub fn on_player_move(&mut self, player: PlayerId, to: &WorldVector) {
        if !self.config.player_move_events {
            return;
        }
        let Some(board) = self.games.game_for_player(player).map(|game| game.board_id()) else {
            return;
        };
        let nearest = self
            .boards
            .nearest_board(to, self.config.max_player_board_distance, &self.host)
            .map(Board::id);
        if nearest != Some(board) {
            tracing::debug!(%player, "玩家離開棋盤範圍");
            self.leave_if_playing(player);
        }
    }

    /// 方塊放置在棋盤格子上
    pub fn on_block_place(&mut self, player: PlayerId, block: &BlockPos) -> bool {
        if !self.config.block_protection || self.boards.board_at(block, &self.host).is_none() {
            return false;
        }
        self.send(Recipient::Player(player), lang::ERROR_BLOCK_PLACE_DENY);
        true
    }

    /// 破壞棋盤格子水平相鄰（掛載展示框）的方塊
    pub fn on_block_break(&mut self, player: PlayerId, block: &BlockPos) -> bool {
        if !self.config.block_protection || !self.is_protected_block(block) {
            return false;
        }
        self.send(Recipient::Player(player), lang::ERROR_BLOCK_BREAK_DENY);
        true
    }

    /// 爆炸或活塞影響的方塊中，移除受保護者
    pub fn retain_unprotected_blocks(&self, blocks: &mut Vec<BlockPos>) {
        if self.config.block_protection {
            blocks.retain(|block| !self.is_protected_block(block));
        }
    }

    /// 格子被攻擊或移除
    pub fn on_slot_damage(&self, slot: &SlotHandle) -> bool {
        self.config.block_protection
            && self
                .boards
                .board_at(&slot.location.block(), &self.host)
                .is_some()
    }

    fn leave_if_playing(&mut self, player: PlayerId) {
        if self.games.game_for_player(player).is_none() {
            return;
        }
        if let Err(e) = self.leave_game(player) {
            tracing::warn!(%player, error = %e, "離開遊戲失敗");
        }
    }

    fn is_protected_block(&self, block: &BlockPos) -> bool {
        HORIZONTAL_NEIGHBOURS.iter().any(|&(dx, dz)| {
            self.boards
                .board_at(&block.relative(dx, 0, dz), &self.host)
                .is_some()
        })
    }
}
