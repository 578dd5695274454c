use crate::card::{cards_to_string, parse_ranks, Card, Rank, Suit};
use crate::combo::{classify_five, Level, Strength};
use crate::error::{GameError, InputError};
use crate::grouping::{form_five, split_into_groups, JOKER_CLASS};
use crate::shot::{Shot, ShotKind, Team};
use serde::{Deserialize, Serialize};
use std::io;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub seat: usize,
    pub hand: Vec<Card>,
    pub team: Team,
    pub kind: PlayerKind,
}

/// 轮到人类玩家时交给输入端的信息
#[derive(Debug)]
pub struct TurnPrompt<'a> {
    pub seat: usize,
    pub hand: &'a [Card],
    /// 手牌拆出来的候选组合，和 AI 看到的一样
    pub combos: Vec<Vec<Card>>,
    /// 当前擂主，`None` 表示新一轮由自己先出
    pub standing: Option<&'a Shot>,
    /// 擂主是不是队友
    pub friend: bool,
}

/// 人类玩家的输入端，例如控制台
pub trait HumanInput {
    /// 读入一行出牌指令，输入流结束时返回 `Ok(None)`
    fn read_line(&mut self, prompt: &TurnPrompt<'_>) -> io::Result<Option<String>>;

    /// 上一行无效。之后会再次调用 `read_line`。
    fn reject(&mut self, reason: &InputError);
}

/// 全部是 AI 时使用
pub struct NoHumans;

impl HumanInput for NoHumans {
    fn read_line(&mut self, _prompt: &TurnPrompt<'_>) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn reject(&mut self, _reason: &InputError) {}
}

impl Player {
    pub fn new(seat: usize, kind: PlayerKind) -> Player {
        Player { seat, hand: Vec::new(), team: Team::of_seat(seat), kind }
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn sort_hand(&mut self) {
        self.hand.sort();
    }

    pub fn is_finished(&self) -> bool {
        self.hand.is_empty()
    }

    /// 从手牌中移除这些牌（按点数和花色精确匹配）。缺任何一张都不做修改。
    pub fn remove_cards(&mut self, cards: &[Card]) -> Result<(), GameError> {
        let mut hand = self.hand.clone();
        for card in cards {
            let pos = hand.iter().position(|c| c == card).ok_or_else(|| {
                GameError::invariant(format!("{}号座位手里没有 {}", self.seat, card))
            })?;
            hand.remove(pos);
        }
        self.hand = hand;
        Ok(())
    }

    /// 给出本回合的出牌
    ///
    /// `standing` 是当前擂主，`None` 表示新一轮由自己先出。
    pub fn next_shot(
        &mut self,
        standing: Option<&Shot>,
        input: &mut dyn HumanInput,
    ) -> Result<Shot, GameError> {
        if self.is_finished() {
            return Err(GameError::invariant(format!("{}号座位已出完，不应再行动", self.seat)));
        }
        if self.kind == PlayerKind::Human {
            return self.shot_by_input(standing, input);
        }

        let Some(standing) = standing else {
            return self.new_round_shot();
        };
        if self.passes_for_friend(standing)? {
            debug!(seat = self.seat, standing = %standing, "队友的牌够大，不压");
            return Ok(Shot::pass(self.team));
        }
        self.shot_by_type(standing)
    }

    // --- AI 出牌 ---

    /// 新一轮先出：优先出第一个五张组合，否则按尺寸类从小到大出第一段
    pub fn new_round_shot(&mut self) -> Result<Shot, GameError> {
        let combos = form_five(&self.hand);
        if let Some(first) = combos.into_iter().next().filter(|c| c.len() == 5) {
            debug!(seat = self.seat, cards = %cards_to_string(&first), "新一轮出五张");
            return self.commit(first);
        }

        let groups = split_into_groups(&self.hand);
        let Some((class, run)) = groups.iter().next() else {
            return Err(GameError::invariant(format!(
                "{}号座位手牌 {} 找不到能出的牌",
                self.seat,
                cards_to_string(&self.hand)
            )));
        };
        let size = opening_size(class, run);
        let cards = match run.get(..size) {
            Some(cards) if size > 0 => cards.to_vec(),
            _ => {
                return Err(GameError::invariant(format!(
                    "{}号座位开牌张数 {} 不合法: {}",
                    self.seat,
                    size,
                    cards_to_string(run)
                )));
            }
        };
        debug!(seat = self.seat, class, cards = %cards_to_string(&cards), "新一轮出牌");
        self.commit(cards)
    }

    /// 擂主是队友时是否放弃压牌
    ///
    /// 单张/对子/三张：点数在 3..=9 以外就不压。
    /// 五张：顺子、同花、葫芦照压；四带一看代表点数是否在 3..=9；
    /// 同花顺和五条一律不压。
    pub fn passes_for_friend(&self, standing: &Shot) -> Result<bool, GameError> {
        if standing.team != self.team {
            return Ok(false);
        }
        if standing.kind != ShotKind::Five {
            let rank = standing
                .cards
                .first()
                .ok_or_else(|| GameError::invariant("擂主没有牌"))?
                .rank;
            return Ok(!rank.is_low());
        }
        let Strength::Five { level, tiebreak } = classify_five(&standing.cards)? else {
            return Err(GameError::BadFiveCards(cards_to_string(&standing.cards)));
        };
        Ok(match level {
            Level::Straight | Level::Flush | Level::FullHouse => false,
            Level::FourOfAKind => !tiebreak.is_low(),
            Level::StraightFlush | Level::FiveOfAKind => true,
        })
    }

    /// 找第一组同类型且大过擂主的牌，找不到就 pass
    pub fn shot_by_type(&mut self, standing: &Shot) -> Result<Shot, GameError> {
        if standing.kind == ShotKind::Five {
            for combo in form_five(&self.hand) {
                // 候选列表里五张组合都排在前面
                if combo.len() != 5 {
                    break;
                }
                if standing.is_beaten_by(&combo)? {
                    debug!(seat = self.seat, cards = %cards_to_string(&combo), "压五张");
                    return self.commit(combo);
                }
            }
        } else {
            let groups = split_into_groups(&self.hand);
            for run in groups.class(standing.size()) {
                if standing.is_beaten_by(run)? {
                    debug!(seat = self.seat, cards = %cards_to_string(run), "压牌");
                    return self.commit(run.clone());
                }
            }
        }
        Ok(Shot::pass(self.team))
    }

    fn commit(&mut self, cards: Vec<Card>) -> Result<Shot, GameError> {
        let shot = Shot::play(cards, self.team)?;
        self.remove_cards(&shot.cards)?;
        Ok(shot)
    }

    // --- 人类玩家 ---

    /// 反复读取输入，直到得到一手合法的牌或 pass
    pub fn shot_by_input(
        &mut self,
        standing: Option<&Shot>,
        input: &mut dyn HumanInput,
    ) -> Result<Shot, GameError> {
        loop {
            let prompt = TurnPrompt {
                seat: self.seat,
                hand: &self.hand,
                combos: form_five(&self.hand),
                standing,
                friend: standing.is_some_and(|s| s.team == self.team),
            };
            let line = input
                .read_line(&prompt)
                .map_err(|e| GameError::Input(e.to_string()))?
                .ok_or(GameError::InputClosed)?;

            match self.parse_shot(&line, standing) {
                Ok(shot) => {
                    self.remove_cards(&shot.cards)?;
                    return Ok(shot);
                }
                Err(reason) => {
                    warn!(seat = self.seat, input = line.trim(), %reason, "输入无效");
                    input.reject(&reason);
                }
            }
        }
    }

    /// 把一行输入解析成出牌，并检查归属、牌型和大小
    pub fn parse_shot(&self, line: &str, standing: Option<&Shot>) -> Result<Shot, InputError> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("pass") {
            return match standing {
                Some(_) => Ok(Shot::pass(self.team)),
                None => Err(InputError::MustOpen),
            };
        }

        let ranks = parse_ranks(line)?;
        if ranks.is_empty() {
            return Err(InputError::Empty);
        }
        if let Some(standing) = standing {
            if ranks.len() != standing.size() {
                return Err(InputError::WrongSize { expected: standing.size(), got: ranks.len() });
            }
        }
        let cards = self.pick_cards(&ranks).ok_or(InputError::NotInHand)?;
        let shot = Shot::play(cards, self.team)?;
        if let Some(standing) = standing {
            if !standing.is_beaten_by(&shot.cards)? {
                return Err(InputError::NotLarger);
            }
        }
        Ok(shot)
    }

    /// 按点数从手牌里挑出具体的牌
    ///
    /// 五张时先看能否全部取同一花色，这样输入的同花能被认出来；
    /// 否则每个点数取手牌中第一张。手里数量不够时返回 `None`。
    pub fn pick_cards(&self, ranks: &[Rank]) -> Option<Vec<Card>> {
        if ranks.len() == 5 {
            for suit in Suit::ALL {
                if let Some(cards) = self.take_matching(ranks, |c| c.suit == Some(suit)) {
                    return Some(cards);
                }
            }
        }
        self.take_matching(ranks, |_| true)
    }

    fn take_matching(&self, ranks: &[Rank], accept: impl Fn(&Card) -> bool) -> Option<Vec<Card>> {
        let mut pool: Vec<Card> = self.hand.iter().copied().filter(|c| accept(c)).collect();
        let mut picked = Vec::with_capacity(ranks.len());
        for &rank in ranks {
            let pos = pool.iter().position(|c| c.rank == rank)?;
            picked.push(pool.remove(pos));
        }
        Some(picked)
    }
}

/// 新一轮按分组出牌时出几张
fn opening_size(class: usize, run: &[Card]) -> usize {
    match class {
        // 王的符号在 UTF-8 里占 3 个字节，符号串字节数除以 3 就是王的张数
        JOKER_CLASS => cards_to_string(run).len() / 3,
        // 没有四张的出法，拆出三张
        4 => 3,
        n => n,
    }
}

// --- 单元测试 ---
