//! 遊戲狀態機
//!
//! 每個棋盤對應一個 [`Game`]。所有狀態變動都經過 [`Game::change_state`]
//! 或 [`Game::play_turn`]，兩者最後都會呼叫 [`Game::reconcile`]，
//! 直到沒有待處理的轉換為止。
//!
//! ```text
//! None ──► Waiting ──(兩人入座)──► Active ──(連線/和局)──► Finished
//!             ▲                      │                        │
//!             └──────(少於兩人)───────┴────(延遲後 / 少於兩人)──┘
//! ```

use crate::config::MainConfig;
use crate::domain::alias::{BoardId, GameId, PlayerId};
use crate::domain::constants::{SEAT_COUNT, TURN_SOUND_PITCH};
use crate::domain::core_types::{GamePhase, LogicalPosition, Marker, Seat, SlotContent, SoundCue};
use crate::error::{GameError, Result};
use crate::host::{Host, Recipient};
use crate::lang;
use crate::logic::lines::{self, ClaimMap, Line};
use crate::registry::BoardRegistry;
use crate::scheduler::{Scheduler, Task, TaskHandle};
use crate::sticky::StickyStatus;
use rand::{Rng, RngCore};
use strum::IntoEnumIterator;

/// 遊戲操作時借用的外部協作者
pub struct GameContext<'a> {
    pub boards: &'a BoardRegistry,
    pub host: &'a mut dyn Host,
    pub scheduler: &'a mut dyn Scheduler,
    pub sticky: &'a mut StickyStatus,
    pub config: &'a MainConfig,
    pub rng: &'a mut dyn RngCore,
}

#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    board: BoardId,
    phase: GamePhase,
    players: [Option<PlayerId>; SEAT_COUNT],
    markers: [Option<Marker>; SEAT_COUNT],
    claims: ClaimMap,
    current_turn: Option<Seat>,
    winner: Option<PlayerId>,
    reset_task: Option<TaskHandle>,
    strobe_task: Option<TaskHandle>,
}

impl Game {
    /// 新遊戲處於 `None`，由註冊表轉入 `Waiting`
    pub fn new(id: GameId, board: BoardId) -> Self {
        Self {
            id,
            board,
            phase: GamePhase::None,
            players: [None; SEAT_COUNT],
            markers: [None; SEAT_COUNT],
            claims: ClaimMap::default(),
            current_turn: None,
            winner: None,
            reset_task: None,
            strobe_task: None,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn board_id(&self) -> BoardId {
        self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self, seat: Seat) -> Option<PlayerId> {
        self.players[seat.index()]
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().flatten().copied()
    }

    pub fn seated_count(&self) -> usize {
        self.players().count()
    }

    pub fn seat_of(&self, player: PlayerId) -> Option<Seat> {
        Seat::iter().find(|seat| self.player(*seat) == Some(player))
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.seat_of(player).is_some()
    }

    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    pub fn current_turn(&self) -> Option<Seat> {
        self.current_turn
    }

    /// 目前輪到的玩家
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_turn.and_then(|seat| self.player(seat))
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn selected_marker(&self, seat: Seat) -> Option<Marker> {
        self.markers[seat.index()]
    }

    /// 實際使用的標記
    ///
    /// 未選擇時依色盤順序取一個預設值，且不會與另一座位的選擇相同。
    pub fn marker_of(&self, seat: Seat) -> Marker {
        if let Some(marker) = self.selected_marker(seat) {
            return marker;
        }
        let taken = self.selected_marker(seat.other());
        Marker::iter()
            .filter(|marker| Some(*marker) != taken)
            .nth(seat.index())
            .unwrap_or(Marker::White)
    }

    pub fn reset_task(&self) -> Option<TaskHandle> {
        self.reset_task
    }

    pub fn strobe_task(&self) -> Option<TaskHandle> {
        self.strobe_task
    }

    pub fn find_winning_line(&self) -> Option<Line> {
        lines::find_winning_line(&self.claims)
    }

    pub fn is_game_a_tie(&self) -> bool {
        lines::is_tie(&self.claims)
    }

    // ------------------------------------------------------------------------
    // 狀態轉換
    // ------------------------------------------------------------------------

    /// 轉換階段並執行進入動作，最後呼叫 [`Game::reconcile`]
    pub fn change_state(&mut self, phase: GamePhase, ctx: &mut GameContext) {
        tracing::debug!(game = %self.id, from = %self.phase, to = %phase, "階段轉換");
        self.cancel_end_of_round(ctx);
        self.phase = phase;

        match phase {
            GamePhase::None => {
                self.fill_board(&SlotContent::Empty, ctx);
                for player in self.players.iter().flatten() {
                    ctx.sticky.clear(&mut *ctx.host, *player);
                }
                self.players = [None; SEAT_COUNT];
                self.markers = [None; SEAT_COUNT];
                self.winner = None;
                self.current_turn = None;
                self.claims.clear();
            }
            GamePhase::Waiting => {
                self.fill_board(&SlotContent::JoinToken, ctx);
                self.winner = None;
                self.current_turn = None;
                self.claims.clear();
            }
            GamePhase::Active => {
                self.fill_board(&SlotContent::Empty, ctx);
                self.claims.clear();
                self.lock_markers();
                self.send_players_message(lang::EVENT_GAME_START, ctx);
                let first = if ctx.rng.random_bool(0.5) {
                    Seat::One
                } else {
                    Seat::Two
                };
                self.current_turn = Some(first);
            }
            GamePhase::Finished => {
                let winner = self.winner_name(ctx);
                self.send_players_message(&lang::event_game_winner(&winner), ctx);
                self.reset_task = Some(ctx.scheduler.run_after_delay(
                    Task::ReturnToLobby { game: self.id },
                    ctx.config.end_of_round_ticks(),
                ));
                self.strobe_task = Some(ctx.scheduler.run_periodic(
                    Task::Strobe { game: self.id },
                    ctx.config.strobe_interval_ticks,
                ));
            }
        }

        self.reconcile(ctx);
    }

    /// 重新評估階段；可重複呼叫
    pub fn reconcile(&mut self, ctx: &mut GameContext) {
        let full = self.seated_count() == SEAT_COUNT;

        match self.phase {
            GamePhase::Active | GamePhase::Finished if !full => {
                self.change_state(GamePhase::Waiting, ctx);
            }
            GamePhase::None => {}
            GamePhase::Waiting if full => {
                self.change_state(GamePhase::Active, ctx);
            }
            GamePhase::Waiting => {
                self.send_players_status(&lang::status_waiting(), ctx);
                self.send_players_message(lang::EVENT_GAME_WAITING, ctx);
            }
            GamePhase::Active => {
                if let Some(line) = self.find_winning_line() {
                    self.winner = self.claims.owner(line[0]);
                    self.change_state(GamePhase::Finished, ctx);
                } else if self.is_game_a_tie() {
                    self.winner = None;
                    self.change_state(GamePhase::Finished, ctx);
                } else if let Some(player) = self.current_player() {
                    let name = lang::display_name(&*ctx.host, player);
                    self.send_players_status(&lang::status_turn(&name), ctx);
                }
            }
            GamePhase::Finished => {
                let winner = self.winner_name(ctx);
                self.send_players_status(&lang::status_winner(&winner), ctx);
            }
        }
    }

    // ------------------------------------------------------------------------
    // 玩家動作
    // ------------------------------------------------------------------------

    /// 目前回合的玩家佔據一格
    ///
    /// 已佔據的格子或非進行中的遊戲靜默忽略。
    pub fn play_turn(&mut self, position: LogicalPosition, ctx: &mut GameContext) {
        if self.phase != GamePhase::Active || self.claims.is_claimed(position) {
            return;
        }
        let Some(seat) = self.current_turn else {
            return;
        };
        let Some(player) = self.player(seat) else {
            return;
        };

        if let Some(board) = ctx.boards.get(&self.board) {
            match board.resolve_cell(position, &*ctx.host) {
                Some(handle) => {
                    ctx.scheduler.run_next_tick(Task::SetSlot {
                        slot: handle.id,
                        content: SlotContent::Player(self.marker_of(seat)),
                    });
                }
                None => tracing::debug!(game = %self.id, %position, "落子格子無法解析"),
            }
            board.play_sound(
                &mut *ctx.host,
                SoundCue::Pling {
                    pitch: TURN_SOUND_PITCH,
                },
            );
        }

        if self.claims.claim(position, player).is_err() {
            return;
        }
        self.current_turn = Some(Seat::next(self.current_turn));
        self.reconcile(ctx);
    }

    /// 入座第一個空位
    pub fn try_join(&mut self, player: PlayerId, ctx: &mut GameContext) -> Result<Seat> {
        if self.phase != GamePhase::Waiting || self.has_player(player) {
            return Err(GameError::SeatUnavailable { game: self.id }.into());
        }
        let seat = Seat::iter()
            .find(|seat| self.player(*seat).is_none())
            .ok_or(GameError::SeatUnavailable { game: self.id })?;

        self.players[seat.index()] = Some(player);
        self.markers[seat.index()] = None;

        let name = lang::display_name(&*ctx.host, player);
        self.send_players_message(&lang::event_game_join(&name), ctx);
        self.reconcile(ctx);

        let options: Vec<Marker> = Marker::iter().collect();
        ctx.host
            .present_marker_choice(player, lang::MENU_MARKER_SELECTION_TITLE, &options);
        Ok(seat)
    }

    /// 離開座位
    pub fn leave(&mut self, player: PlayerId, ctx: &mut GameContext) -> Result<()> {
        let seat = self
            .seat_of(player)
            .ok_or(GameError::NotInGame { player })?;

        let name = lang::display_name(&*ctx.host, player);
        self.send_players_message(&lang::event_game_leave(&name), ctx);

        self.players[seat.index()] = None;
        self.markers[seat.index()] = None;
        ctx.sticky.clear(&mut *ctx.host, player);

        self.reconcile(ctx);
        Ok(())
    }

    /// 記錄玩家的標記選擇；與另一座位實際使用的標記相同時拒絕
    pub fn select_marker(&mut self, player: PlayerId, marker: Marker) -> Result<()> {
        let seat = self
            .seat_of(player)
            .ok_or(GameError::NotInGame { player })?;
        if self.marker_of(seat.other()) == marker {
            return Err(GameError::MarkerInUse { marker }.into());
        }
        self.markers[seat.index()] = Some(marker);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // 排程任務
    // ------------------------------------------------------------------------

    /// 回合結束的延遲任務
    pub fn return_to_lobby(&mut self, ctx: &mut GameContext) {
        self.reset_task = None;
        if self.phase == GamePhase::Finished {
            self.change_state(GamePhase::Waiting, ctx);
        }
    }

    /// 結束動畫的一次閃爍
    ///
    /// 遊戲不在 `Finished` 或棋盤無法解析時取消自己。
    pub fn strobe(&mut self, handle: TaskHandle, ctx: &mut GameContext) {
        let board = ctx
            .boards
            .get(&self.board)
            .filter(|board| board.orientation(&*ctx.host).is_some());
        let (GamePhase::Finished, Some(board)) = (self.phase, board) else {
            ctx.scheduler.cancel(handle);
            if self.strobe_task == Some(handle) {
                self.strobe_task = None;
            }
            return;
        };

        let positions: Vec<LogicalPosition> = match self.find_winning_line() {
            Some(line) => line.to_vec(),
            None if self.is_game_a_tie() => LogicalPosition::ALL.to_vec(),
            None => Vec::new(),
        };

        for position in positions {
            let Some(handle) = board.resolve_cell(position, &*ctx.host) else {
                continue;
            };
            let shown = ctx.host.content(handle.id).unwrap_or(SlotContent::Empty);
            let next = if shown == SlotContent::Empty {
                let Some(seat) = self.claims.owner(position).and_then(|p| self.seat_of(p)) else {
                    continue;
                };
                SlotContent::Player(self.marker_of(seat))
            } else {
                SlotContent::Empty
            };
            ctx.host.set_content(handle.id, next);
        }
    }

    // ------------------------------------------------------------------------
    // 訊息
    // ------------------------------------------------------------------------

    pub fn send_players_message(&self, message: &str, ctx: &mut GameContext) {
        for player in self.players() {
            if ctx.host.is_online(player) {
                lang::send(&mut *ctx.host, Recipient::Player(player), message);
            }
        }
    }

    pub fn send_players_status(&self, text: &str, ctx: &mut GameContext) {
        for player in self.players() {
            if ctx.host.is_online(player) {
                ctx.sticky.send(&mut *ctx.host, player, text);
            }
        }
    }

    fn winner_name(&self, ctx: &GameContext) -> String {
        match self.winner {
            Some(player) => lang::display_name(&*ctx.host, player),
            None => lang::TIE_NAME.to_string(),
        }
    }

    fn fill_board(&self, content: &SlotContent, ctx: &mut GameContext) {
        match ctx.boards.get(&self.board) {
            Some(board) => board.fill(content, &*ctx.host, &mut *ctx.scheduler),
            None => tracing::debug!(game = %self.id, board = %self.board, "棋盤不存在，略過填滿"),
        }
    }

    /// 開局時固定兩個座位的標記
    fn lock_markers(&mut self) {
        let locked = [self.marker_of(Seat::One), self.marker_of(Seat::Two)];
        for seat in Seat::iter() {
            self.markers[seat.index()] = Some(locked[seat.index()]);
        }
    }

    fn cancel_end_of_round(&mut self, ctx: &mut GameContext) {
        for handle in [self.reset_task.take(), self.strobe_task.take()]
            .into_iter()
            .flatten()
        {
            ctx.scheduler.cancel(handle);
        }
    }
}
