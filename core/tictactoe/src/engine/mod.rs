//! 引擎：持有註冊表與所有協作者
//!
//! 宿主 adapter 建立一個 [`Engine`]，每 tick 呼叫 [`Engine::tick`]，
//! 並把宿主事件轉交給 `events` 中的處理函數。

pub mod events;

use crate::board::Board;
use crate::config::MainConfig;
use crate::domain::alias::{BoardId, GameId, PlayerId};
use crate::domain::constants::{ACCEPT_SOUND_PITCH, REJECT_SOUND_PITCH};
use crate::domain::core_types::{GamePhase, Marker, SlotContent, SoundCue};
use crate::error::{BoardError, ErrorKind, GameError, Result};
use crate::game::GameContext;
use crate::host::{Host, Recipient};
use crate::lang;
use crate::registry::{BoardRegistry, GameRegistry};
use crate::scheduler::{Scheduler, Task, TaskHandle, TickScheduler};
use crate::sticky::StickyStatus;
use crate::store::BoardStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

pub struct Engine<H: Host, S: BoardStore> {
    host: H,
    store: S,
    config: MainConfig,
    boards: BoardRegistry,
    games: GameRegistry,
    scheduler: TickScheduler,
    sticky: StickyStatus,
    rng: StdRng,
    board_creators: HashSet<PlayerId>,
    used_board_ids: HashSet<BoardId>,
}

impl<H: Host, S: BoardStore> Engine<H, S> {
    pub fn new(host: H, store: S, config: MainConfig) -> Self {
        Self::with_rng(host, store, config, StdRng::from_os_rng())
    }

    /// 啟動：載入棋盤 → 驗證並儲存 → 每個棋盤建立遊戲 → 啟動狀態列重送
    ///
    /// 載入失敗時以空白狀態啟動，且不覆寫既有檔案。
    pub fn with_rng(host: H, store: S, config: MainConfig, rng: StdRng) -> Self {
        let mut engine = Self {
            host,
            store,
            config,
            boards: BoardRegistry::default(),
            games: GameRegistry::default(),
            scheduler: TickScheduler::default(),
            sticky: StickyStatus::default(),
            rng,
            board_creators: HashSet::new(),
            used_board_ids: HashSet::new(),
        };

        match engine.store.load_boards() {
            Ok(boards) => {
                engine.used_board_ids.extend(boards.keys().copied());
                engine.boards = BoardRegistry::from_boards(boards);
                engine.save_boards();
            }
            Err(e) => tracing::error!(error = %e, "載入棋盤失敗"),
        }

        let (games, mut ctx) = engine.parts();
        games.generate_games(&mut ctx);

        let interval = engine.config.sticky_refresh_ticks;
        engine.scheduler.run_periodic(Task::RefreshSticky, interval);
        tracing::info!(
            boards = engine.boards.len(),
            games = engine.games.len(),
            "引擎已啟動"
        );
        engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &MainConfig {
        &self.config
    }

    pub fn boards(&self) -> &BoardRegistry {
        &self.boards
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn sticky(&self) -> &StickyStatus {
        &self.sticky
    }

    /// 拆出遊戲註冊表與其他協作者
    fn parts(&mut self) -> (&mut GameRegistry, GameContext<'_>) {
        let Self {
            host,
            boards,
            games,
            scheduler,
            sticky,
            config,
            rng,
            ..
        } = self;
        (
            games,
            GameContext {
                boards,
                host,
                scheduler,
                sticky,
                config,
                rng,
            },
        )
    }

    pub(crate) fn send(&mut self, to: Recipient, message: &str) {
        lang::send(&mut self.host, to, message);
    }

    // ------------------------------------------------------------------------
    // 排程
    // ------------------------------------------------------------------------

    /// 前進一 tick 並執行所有到期任務
    pub fn tick(&mut self) {
        self.scheduler.advance();
        while let Some((handle, task)) = self.scheduler.pop_due() {
            self.run_task(handle, task);
        }
    }

    /// 連續前進多個 tick
    pub fn run_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn run_task(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::SetSlot { slot, content } => self.host.set_content(slot, content),
            Task::ReturnToLobby { game } => {
                let (games, mut ctx) = self.parts();
                if let Some(game) = games.get_mut(game) {
                    game.return_to_lobby(&mut ctx);
                }
            }
            Task::Strobe { game } => {
                let (games, mut ctx) = self.parts();
                match games.get_mut(game) {
                    Some(game) => game.strobe(handle, &mut ctx),
                    None => ctx.scheduler.cancel(handle),
                }
            }
            Task::RefreshSticky => self.sticky.refresh(&mut self.host),
        }
    }

    // ------------------------------------------------------------------------
    // 棋盤
    // ------------------------------------------------------------------------

    /// 加入棋盤、儲存並建立對應的遊戲
    pub fn add_board(&mut self, board: Board) -> Result<GameId> {
        let id = board.id();
        if self.boards.contains(&id) {
            return Err(BoardError::DuplicateId { board: id }.into());
        }
        self.boards.insert(board, &self.host)?;
        self.used_board_ids.insert(id);
        self.save_boards();

        // 儲存時的驗證可能已移除這個棋盤
        if !self.boards.contains(&id) {
            return Err(BoardError::InvalidGrid { board: id }.into());
        }
        let (games, mut ctx) = self.parts();
        let game = games.generate_game(id, &mut ctx);
        tracing::info!(board = %id, "已建立棋盤");
        Ok(game)
    }

    /// 先拆除遊戲，再移除棋盤並儲存
    pub fn remove_board(&mut self, id: BoardId) -> Result<()> {
        if !self.boards.contains(&id) {
            return Err(BoardError::BoardNotFound { board: id }.into());
        }
        self.teardown_game(id);
        self.boards.remove(&id);
        self.used_board_ids.remove(&id);
        self.save_boards();
        tracing::info!(board = %id, "已移除棋盤");
        Ok(())
    }

    /// 驗證後儲存；驗證移除的棋盤一併拆除遊戲並清空格子
    ///
    /// 儲存失敗只記錄，記憶體中的狀態維持不變。
    pub fn save_boards(&mut self) {
        for board in self.boards.validate(&self.host) {
            self.teardown_game(board.id());
            self.used_board_ids.remove(&board.id());
            self.clear_orphan_cells(&board);
        }
        if let Err(e) = self.store.save_boards(self.boards.boards()) {
            tracing::error!(error = %e, "儲存棋盤失敗");
        }
    }

    /// 清空已移除棋盤上的遊戲標記；屬於其他棋盤的格子與外來物品不動
    fn clear_orphan_cells(&mut self, board: &Board) {
        for (_, handle) in board.cells(&self.host) {
            let is_marker = self
                .host
                .content(handle.id)
                .is_some_and(|content| content.is_game_marker());
            let shared = self
                .boards
                .board_at(&handle.location.block(), &self.host)
                .is_some();
            if is_marker && !shared {
                self.scheduler.run_next_tick(Task::SetSlot {
                    slot: handle.id,
                    content: SlotContent::Empty,
                });
            }
        }
    }

    fn teardown_game(&mut self, board: BoardId) {
        let (games, mut ctx) = self.parts();
        let ids: Vec<GameId> = games
            .iter()
            .filter(|game| game.board_id() == board)
            .map(|game| game.id())
            .collect();
        for id in ids {
            if let Some(game) = games.get_mut(id) {
                game.change_state(GamePhase::None, &mut ctx);
            }
            games.destroy(id);
        }
    }

    // ------------------------------------------------------------------------
    // 玩家
    // ------------------------------------------------------------------------

    pub fn is_board_creator(&self, player: PlayerId) -> bool {
        self.board_creators.contains(&player)
    }

    /// 進入建立棋盤模式；遊戲中的玩家不能進入
    pub fn begin_board_creation(&mut self, player: PlayerId) -> bool {
        if self.games.game_for_player(player).is_some() {
            return false;
        }
        self.board_creators.insert(player)
    }

    pub fn cancel_board_creation(&mut self, player: PlayerId) -> bool {
        self.board_creators.remove(&player)
    }

    /// 離開目前的遊戲
    pub fn leave_game(&mut self, player: PlayerId) -> Result<()> {
        let (games, mut ctx) = self.parts();
        games.leave(player, &mut ctx)
    }

    /// 顏色選擇介面的回呼
    pub fn select_marker(&mut self, player: PlayerId, marker: Marker) -> Result<()> {
        let result = self
            .games
            .game_for_player_mut(player)
            .ok_or_else(|| GameError::NotInGame { player }.into())
            .and_then(|game| game.select_marker(player, marker));

        let (pitch, message) = match &result {
            Ok(()) => (ACCEPT_SOUND_PITCH, lang::SUCCESS_MARKER_SELECTED),
            Err(e) if matches!(e.kind(), ErrorKind::Game(GameError::MarkerInUse { .. })) => {
                (REJECT_SOUND_PITCH, lang::ERROR_MARKER_IN_USE)
            }
            Err(_) => (REJECT_SOUND_PITCH, lang::ERROR_NOT_IN_GAME),
        };
        self.host
            .play_player_sound(player, SoundCue::Pling { pitch });
        self.send(Recipient::Player(player), message);
        result
    }
}
