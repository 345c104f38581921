use crate::domain::alias::{BoardId, GameId, PlayerId};
use crate::domain::core_types::{GamePhase, Seat};
use crate::error::{BoardError, GameError, Result};
use crate::game::{Game, GameContext};
use crate::logic::id_generator::generate_unique_id;
use std::collections::HashSet;

/// 所有遊戲
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: Vec<Game>,
    used_ids: HashSet<GameId>,
}

impl GameRegistry {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|game| game.id() == id)
    }

    pub fn get_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.games.iter_mut().find(|game| game.id() == id)
    }

    /// 為每個棋盤建立遊戲（啟動時）
    pub fn generate_games(&mut self, ctx: &mut GameContext) {
        for board in ctx.boards.ids() {
            if self.game_for_board(board, ctx).is_none() {
                self.generate_game(board, ctx);
            }
        }
    }

    /// 為棋盤建立一個新遊戲，並轉入 `Waiting`
    pub fn generate_game(&mut self, board: BoardId, ctx: &mut GameContext) -> GameId {
        let id = generate_unique_id(&mut self.used_ids);
        let mut game = Game::new(id, board);
        game.change_state(GamePhase::Waiting, ctx);
        self.games.push(game);
        tracing::debug!(game = %id, %board, "建立遊戲");
        id
    }

    pub fn game_for_player(&self, player: PlayerId) -> Option<&Game> {
        self.games.iter().find(|game| game.has_player(player))
    }

    pub fn game_for_player_mut(&mut self, player: PlayerId) -> Option<&mut Game> {
        self.games.iter_mut().find(|game| game.has_player(player))
    }

    /// 棋盤的遊戲；棋盤已不在註冊表中的遊戲視為找不到
    pub fn game_for_board(&self, board: BoardId, ctx: &GameContext) -> Option<&Game> {
        self.games
            .iter()
            .find(|game| game.board_id() == board && ctx.boards.contains(&game.board_id()))
    }

    pub fn game_for_board_mut(&mut self, board: BoardId, ctx: &GameContext) -> Option<&mut Game> {
        self.games
            .iter_mut()
            .find(|game| game.board_id() == board && ctx.boards.contains(&game.board_id()))
    }

    /// 加入棋盤的遊戲；已在其他遊戲中的玩家不能加入
    pub fn try_join(
        &mut self,
        player: PlayerId,
        board: BoardId,
        ctx: &mut GameContext,
    ) -> Result<Seat> {
        if let Some(game) = self.game_for_player(player) {
            return Err(GameError::SeatUnavailable { game: game.id() }.into());
        }
        let game = self
            .game_for_board_mut(board, ctx)
            .ok_or(BoardError::BoardNotFound { board })?;
        game.try_join(player, ctx)
    }

    /// 離開目前的遊戲
    pub fn leave(&mut self, player: PlayerId, ctx: &mut GameContext) -> Result<()> {
        let game = self
            .game_for_player_mut(player)
            .ok_or(GameError::NotInGame { player })?;
        game.leave(player, ctx)
    }

    /// 從註冊表移除；呼叫端須先將遊戲轉入 `None`
    pub fn destroy(&mut self, id: GameId) -> Option<Game> {
        let index = self.games.iter().position(|game| game.id() == id)?;
        self.used_ids.remove(&id);
        Some(self.games.remove(index))
    }
}
