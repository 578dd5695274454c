use crate::player::{Player, PlayerKind};
use crate::shot::{Shot, Team};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub type GameId = Uuid;

/// 座位数，三对三
pub const SEATS: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: GameId,
    pub players: [Player; SEATS],
    // 已出完牌的座位，进入后不再移出
    pub finished: BTreeSet<usize>,
    pub phase: GamePhase,

    pub cur_seat: usize, // 轮到谁行动
    // 当前擂主，`None` 表示新一轮还没人出牌
    pub standing: Option<Shot>,
    // 擂主座位。擂主出完牌后顺延到下一个没出完的座位
    pub leader: Option<usize>,
    // 本轮还需要几次 pass 才结束
    pub num_passes: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Dealing,
    Playing,
    Finished(Team),
}

// --- GameState 的实现方法 ---

impl GameState {
    pub fn new(kinds: [PlayerKind; SEATS]) -> Self {
        GameState {
            game_id: Uuid::new_v4(),
            players: std::array::from_fn(|seat| Player::new(seat, kinds[seat])),
            finished: BTreeSet::new(),
            phase: GamePhase::Dealing,
            cur_seat: 0,
            standing: None,
            leader: None,
            num_passes: 0,
        }
    }

    /// 一个人类玩家坐在 `seat`，其余都是 AI
    pub fn with_human(seat: usize) -> Self {
        let mut kinds = [PlayerKind::Ai; SEATS];
        if let Some(kind) = kinds.get_mut(seat) {
            *kind = PlayerKind::Human;
        }
        Self::new(kinds)
    }

    pub fn all_ai() -> Self {
        Self::new([PlayerKind::Ai; SEATS])
    }

    pub fn is_active(&self, seat: usize) -> bool {
        !self.finished.contains(&seat)
    }

    pub fn active_seats(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SEATS).filter(|&seat| self.is_active(seat))
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Finished(_))
    }

    pub fn winner(&self) -> Option<Team> {
        match self.phase {
            GamePhase::Finished(team) => Some(team),
            _ => None,
        }
    }

    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum()
    }
}

// --- 单元测试 ---
