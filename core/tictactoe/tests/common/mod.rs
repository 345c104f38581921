//! 整合測試共用的場景建構

#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe::board::Board;
use tictactoe::config::MainConfig;
use tictactoe::domain::alias::{BoardId, PlayerId};
use tictactoe::domain::core_types::{BlockPos, LogicalPosition, Orientation};
use tictactoe::engine::Engine;
use tictactoe::engine::events::Hand;
use tictactoe::game::Game;
use tictactoe::host::SlotHandle;
use tictactoe::test_helpers::{MemoryBoardStore, MemoryHost};
use uuid::Uuid;

pub const WORLD: &str = "world";

pub type TestEngine = Engine<MemoryHost, MemoryBoardStore>;

pub fn block(x: i32, y: i32, z: i32) -> BlockPos {
    BlockPos {
        world: WORLD.to_string(),
        x,
        y,
        z,
    }
}

/// 已放好九個格子並登錄為棋盤的場景
pub struct Scene {
    pub engine: TestEngine,
    pub board: BoardId,
    /// 依掃描順序排列的格子
    pub grid: Vec<SlotHandle>,
    pub alice: PlayerId,
    pub bob: PlayerId,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(MainConfig::default())
    }

    pub fn with_config(config: MainConfig) -> Self {
        let mut host = MemoryHost::with_world(WORLD);
        let center = block(0, 64, 0);
        let grid = host.build_grid(&center, Orientation::North);
        let alice = host.add_player("Alice");
        let bob = host.add_player("Bob");

        let board = Board::new(Uuid::from_u128(1), center.to_vector());
        let board_id = board.id();
        let store = MemoryBoardStore::with_boards([board]);
        let mut engine = Engine::with_rng(host, store, config, StdRng::seed_from_u64(42));
        engine.tick();

        Self {
            engine,
            board: board_id,
            grid,
            alice,
            bob,
        }
    }

    pub fn slot(&self, position: LogicalPosition) -> SlotHandle {
        self.grid[position.index()].clone()
    }

    pub fn click(&mut self, player: PlayerId, position: LogicalPosition) -> bool {
        let slot = self.slot(position);
        self.engine.on_slot_interact(player, &slot, Hand::Main)
    }

    pub fn game(&self) -> &Game {
        self.engine
            .games()
            .iter()
            .find(|game| game.board_id() == self.board)
            .expect("棋盤應有對應的遊戲")
    }

    /// 兩位玩家依序加入
    pub fn join_both(&mut self) {
        self.click(self.alice, LogicalPosition::Center);
        self.click(self.bob, LogicalPosition::Center);
    }

    /// 由目前回合的玩家依序落子
    pub fn play(&mut self, positions: &[LogicalPosition]) {
        for &position in positions {
            let player = self.game().current_player().expect("應有目前回合的玩家");
            self.click(player, position);
        }
    }
}
