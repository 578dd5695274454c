use crate::card::{create_shoe, Card};
use crate::error::GameError;
use crate::event::{GameEvent, SeatHand};
use crate::player::HumanInput;
use crate::shot::Team;
use crate::state::*;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, info_span};

/// 洗牌和决定先手的随机来源
///
/// 所有 `rand::Rng` 都自动实现，测试里用固定种子的 `StdRng` 就能复现整局。
pub trait Shuffle {
    fn shuffle_shoe(&mut self, shoe: &mut [Card]);
    fn starting_seat(&mut self, seats: usize) -> usize;
}

impl<R: Rng> Shuffle for R {
    fn shuffle_shoe(&mut self, shoe: &mut [Card]) {
        shoe.shuffle(self);
    }

    fn starting_seat(&mut self, seats: usize) -> usize {
        self.random_range(0..seats)
    }
}

// --- 核心游戏流程函数 ---

/// 发牌
///
/// - 三副牌洗好后从 0 号座位开始轮流发，每人 27 张，发完后理牌。
/// - 随机决定先手，先手出新一轮的第一手牌。
/// - 阶段从 Dealing 进入 Playing。
pub fn deal(state: &mut GameState, shuffler: &mut impl Shuffle) -> Result<GameEvent, GameError> {
    if state.phase != GamePhase::Dealing {
        return Err(GameError::invariant(format!("{:?} 阶段不能发牌", state.phase)));
    }

    let mut shoe = create_shoe();
    shuffler.shuffle_shoe(&mut shoe);
    for (i, card) in shoe.into_iter().enumerate() {
        state.players[i % SEATS].add_card(card);
    }
    for player in state.players.iter_mut() {
        player.sort_hand();
    }

    let starting_seat = shuffler.starting_seat(SEATS);
    if starting_seat >= SEATS {
        return Err(GameError::invariant(format!("先手座位 {} 超出范围", starting_seat)));
    }
    state.cur_seat = starting_seat;
    state.leader = Some(starting_seat);
    state.standing = None;
    state.num_passes = reset_passes(state);
    state.phase = GamePhase::Playing;

    info!(game_id = %state.game_id, starting_seat, "发牌完成");
    Ok(GameEvent::Dealt {
        game_id: state.game_id,
        starting_seat,
        hands: SeatHand::snapshot(state),
    })
}

/// 推进一个回合
///
/// 上一轮所有人都 pass 后先清空擂主，再由当前座位行动：
/// - 出牌：成为擂主，pass 计数重置。
/// - pass：pass 计数减一。
///
/// 手牌出完的座位记入 `finished`，擂主顺延到下一个座位。
/// 一队三人全部出完时进入 Finished，否则轮到下一个没出完的座位。
pub fn play_turn(
    state: &mut GameState,
    input: &mut dyn HumanInput,
) -> Result<Vec<GameEvent>, GameError> {
    if state.phase != GamePhase::Playing {
        return Err(GameError::invariant(format!("{:?} 阶段不能出牌", state.phase)));
    }
    let mut events = Vec::new();

    if state.num_passes == 0 {
        state.standing = None;
        state.num_passes = reset_passes(state);
        debug!(leader = ?state.leader, "新一轮");
        events.push(GameEvent::RoundReset { hands: SeatHand::snapshot(state) });
    }

    let seat = state.cur_seat;
    if !state.is_active(seat) {
        return Err(GameError::invariant(format!("{}号座位已出完，不应再行动", seat)));
    }

    let shot = state.players[seat].next_shot(state.standing.as_ref(), input)?;
    if shot.is_pass() {
        if state.standing.is_none() {
            return Err(GameError::invariant(format!("{}号座位先手却 pass", seat)));
        }
        state.num_passes = state
            .num_passes
            .checked_sub(1)
            .ok_or_else(|| GameError::invariant("pass 计数小于 0"))?;
    } else {
        state.standing = Some(shot.clone());
        state.leader = Some(seat);
        state.num_passes = reset_passes(state);
    }
    info!(seat, shot = %shot, passes_left = state.num_passes, "出牌");
    events.push(GameEvent::Turn { seat, shot, passes_left: state.num_passes });

    if state.players[seat].is_finished() && state.finished.insert(seat) {
        let place = state.finished.len();
        info!(seat, place, "出完手牌");
        events.push(GameEvent::SeatFinished { seat, place });
        if let Some(leader) = state.leader {
            state.leader = next_seat(state, leader);
        }
    }

    if let Some(team) = winning_team(state) {
        state.phase = GamePhase::Finished(team);
        let finished: Vec<usize> = state.finished.iter().copied().collect();
        info!(%team, ?finished, "对局结束");
        events.push(GameEvent::TeamWon { team, finished });
        return Ok(events);
    }

    state.cur_seat = next_seat(state, seat)
        .ok_or_else(|| GameError::invariant("没有还能行动的座位"))?;
    Ok(events)
}

/// 从发牌一直打到一队获胜，每个事件交给 `on_event`
pub fn run_game(
    state: &mut GameState,
    shuffler: &mut impl Shuffle,
    input: &mut dyn HumanInput,
    mut on_event: impl FnMut(&GameEvent),
) -> Result<Team, GameError> {
    let span = info_span!("game", id = %state.game_id);
    let _guard = span.enter();

    if state.phase == GamePhase::Dealing {
        on_event(&deal(state, shuffler)?);
    }
    loop {
        if let Some(team) = state.winner() {
            return Ok(team);
        }
        for event in play_turn(state, input)? {
            on_event(&event);
        }
    }
}

// --- 辅助逻辑函数 ---

/// 本轮结束前需要的 pass 次数：除自己以外还没出完的座位数
pub fn reset_passes(state: &GameState) -> usize {
    (SEATS - 1).saturating_sub(state.finished.len())
}

/// `cur` 之后下一个没出完的座位
pub fn next_seat(state: &GameState, cur: usize) -> Option<usize> {
    (1..=SEATS)
        .map(|step| (cur + step) % SEATS)
        .find(|&seat| state.is_active(seat))
}

/// 某队三个座位都出完即获胜，先检查一队
pub fn winning_team(state: &GameState) -> Option<Team> {
    [Team::One, Team::Two]
        .into_iter()
        .find(|team| team.seats().iter().all(|seat| state.finished.contains(seat)))
}

// --- 单元测试 ---
