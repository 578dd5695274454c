use crate::card::{cards_to_string, Card};
use crate::grouping::form_five;
use crate::shot::{Shot, Team};
use crate::state::{GameId, GameState};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- 对局事件 ---
// 状态机每推进一步就返回若干事件，调用方决定打印成文本还是 JSON。

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// 发牌完成
    Dealt {
        game_id: GameId,
        starting_seat: usize,
        hands: Vec<SeatHand>,
    },

    /// 所有人都 pass，擂主清空，开始新一轮
    RoundReset { hands: Vec<SeatHand> },

    /// 一个座位行动了一次
    Turn {
        seat: usize,
        shot: Shot,
        /// 行动后本轮还需要的 pass 次数
        passes_left: usize,
    },

    /// 某个座位出完了手牌
    SeatFinished {
        seat: usize,
        /// 第几个出完，从 1 开始
        place: usize,
    },

    /// 某队三个座位全部出完
    TeamWon { team: Team, finished: Vec<usize> },
}

/// 某个座位的手牌快照，附带 AI 视角的候选组合
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeatHand {
    pub seat: usize,
    pub cards: Vec<Card>,
    pub combos: Vec<Vec<Card>>,
}

impl SeatHand {
    /// 所有还没出完的座位
    pub fn snapshot(state: &GameState) -> Vec<SeatHand> {
        state
            .active_seats()
            .map(|seat| {
                let cards = state.players[seat].hand.clone();
                let combos = form_five(&cards);
                SeatHand { seat, cards, combos }
            })
            .collect()
    }
}

impl GameEvent {
    /// 发牌和新一轮时附带的手牌
    pub fn hands(&self) -> &[SeatHand] {
        match self {
            GameEvent::Dealt { hands, .. } | GameEvent::RoundReset { hands } => hands,
            _ => &[],
        }
    }
}

impl fmt::Display for SeatHand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player{}: {}, len={}", self.seat, cards_to_string(&self.cards), self.cards.len())?;
        write!(f, "\n  All 5 combos:")?;
        for combo in &self.combos {
            write!(f, " {}", cards_to_string(combo))?;
        }
        Ok(())
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameEvent::Dealt { game_id, starting_seat, .. } => {
                write!(f, "Game {}: dealt, Player{} starts", game_id, starting_seat)
            }
            GameEvent::RoundReset { .. } => write!(f, "---------- new round ----------"),
            GameEvent::Turn { seat, shot, passes_left } => {
                write!(f, "Player{}: {}, numPasses={}", seat, shot, passes_left)
            }
            GameEvent::SeatFinished { seat, place } => {
                write!(f, "Player{} finishes (#{})", seat, place)
            }
            GameEvent::TeamWon { team, finished } => write!(f, "{} wins! {:?}", team, finished),
        }
    }
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    #[test]
    fn test_turn_line() {
        let shot = Shot::play(vec![Card::new(Rank::Five, Suit::Club); 2], Team::Two).unwrap();
        let event = GameEvent::Turn { seat: 3, shot, passes_left: 4 };
        assert_eq!(event.to_string(), "Player3: 55, numPasses=4");

        let event = GameEvent::Turn { seat: 0, shot: Shot::pass(Team::One), passes_left: 2 };
        assert_eq!(event.to_string(), "Player0: pass, numPasses=2");
    }

    #[test]
    fn test_win_line() {
        let event = GameEvent::TeamWon { team: Team::One, finished: vec![0, 2, 4] };
        assert_eq!(event.to_string(), "Team 1 wins! [0, 2, 4]");
    }

    #[test]
    fn test_events_serialize_as_json() {
        let event = GameEvent::SeatFinished { seat: 5, place: 1 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"SeatFinished":{"seat":5,"place":1}}"#);
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_seat_hand_snapshot_skips_finished() {
        let mut state = GameState::all_ai();
        state.players[1].add_card(Card::new(Rank::Three, Suit::Heart));
        state.finished.insert(0);
        let hands = SeatHand::snapshot(&state);
        assert_eq!(hands.len(), 5);
        assert_eq!(hands[0].seat, 1);
        assert_eq!(hands[0].to_string(), "Player1: 3, len=1\n  All 5 combos:");
    }
}
