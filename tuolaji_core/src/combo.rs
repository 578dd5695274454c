use crate::card::{cards_to_string, Card, Rank};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 五张牌型等级 (Level)
/// 变体按从小到大排列，直接用派生的 `Ord` 比较。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Level {
    Straight,      // 顺子
    Flush,         // 同花
    FullHouse,     // 葫芦 (三带二)
    FourOfAKind,   // 四带一
    StraightFlush, // 同花顺
    FiveOfAKind,   // 五条，只有三副牌才可能出现
}

impl Level {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// 一组牌的牌力 (Strength)
/// 同张数的两组牌才可以比较，所以两组牌总是落在同一个变体里。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Strength {
    /// 单张、对子、三张只看点数
    Group(Rank),
    /// 五张先比等级，再比代表点数
    Five { level: Level, tiebreak: Rank },
}

impl Strength {
    /// 等级数值，单张/对子/三张恒为 0
    pub fn level(&self) -> u8 {
        match self {
            Strength::Group(_) => 0,
            Strength::Five { level, .. } => level.value(),
        }
    }

    pub fn tiebreak(&self) -> Rank {
        match self {
            Strength::Group(rank) => *rank,
            Strength::Five { tiebreak, .. } => *tiebreak,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Level::Straight => "顺子",
            Level::Flush => "同花",
            Level::FullHouse => "葫芦",
            Level::FourOfAKind => "四带一",
            Level::StraightFlush => "同花顺",
            Level::FiveOfAKind => "五条",
        })
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strength::Group(rank) => write!(f, "{}", rank),
            Strength::Five { level, tiebreak } => write!(f, "{}({})", level, tiebreak),
        }
    }
}

// --- 牌型判断 ---

/// 五张点数严格连续。2 记作 15，所以 J-Q-K-A-2 也算顺子。
pub fn is_straight(cards: &[Card]) -> bool {
    if cards.len() != 5 {
        return false;
    }
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    values.windows(2).all(|w| w[0] + 1 == w[1])
}

/// 五张同一花色。王没有花色，不能参与同花。
pub fn is_flush(cards: &[Card]) -> bool {
    cards.len() == 5
        && cards[0].suit.is_some()
        && cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

/// 判定五张牌的牌型等级和代表点数
///
/// 先按点数出现次数判断：5 次为五条，4 次为四带一，3 次一律算葫芦，
/// 代表点数取出现次数最多的点数（次数相同取较大的点数）。
/// 否则看顺子和同花，代表点数取五张中最大的点数。
pub fn classify_five(cards: &[Card]) -> Result<Strength, GameError> {
    if cards.len() != 5 {
        return Err(GameError::BadCardCount(cards.len()));
    }

    let mut counts: BTreeMap<Rank, usize> = BTreeMap::new();
    for card in cards {
        *counts.entry(card.rank).or_insert(0) += 1;
    }
    // 按 (次数, 点数) 取最大，次数相同时偏向大点数
    let (large, large_count) = counts
        .iter()
        .map(|(&rank, &count)| (rank, count))
        .max_by_key(|&(rank, count)| (count, rank))
        .ok_or_else(|| GameError::BadFiveCards(cards_to_string(cards)))?;
    let large_num = counts
        .keys()
        .next_back()
        .copied()
        .ok_or_else(|| GameError::BadFiveCards(cards_to_string(cards)))?;

    let by_count = match large_count {
        5 => Some(Level::FiveOfAKind),
        4 => Some(Level::FourOfAKind),
        3 => Some(Level::FullHouse),
        _ => None,
    };
    if let Some(level) = by_count {
        return Ok(Strength::Five { level, tiebreak: large });
    }

    let level = match (is_straight(cards), is_flush(cards)) {
        (true, true) => Level::StraightFlush,
        (false, true) => Level::Flush,
        (true, false) => Level::Straight,
        (false, false) => return Err(GameError::BadFiveCards(cards_to_string(cards))),
    };
    Ok(Strength::Five { level, tiebreak: large_num })
}

/// 校验一组牌能否作为一手出牌，并给出它的牌力
pub fn validate(cards: &[Card]) -> Result<Strength, GameError> {
    match cards.len() {
        1 | 2 | 3 => {
            let rank = cards[0].rank;
            if cards.iter().any(|c| c.rank != rank) {
                return Err(GameError::MixedRanks(cards_to_string(cards)));
            }
            Ok(Strength::Group(rank))
        }
        5 => classify_five(cards),
        n => Err(GameError::BadCardCount(n)),
    }
}

/// `challenger` 是否严格大过 `standing`。点数/牌力相同不算大。
pub fn dominates(challenger: &[Card], standing: &[Card]) -> Result<bool, GameError> {
    if challenger.len() != standing.len() {
        return Err(GameError::SizeMismatch {
            challenger: cards_to_string(challenger),
            standing: cards_to_string(standing),
        });
    }
    let challenger = validate(challenger)?;
    let standing = validate(standing)?;
    Ok(challenger > standing)
}

// --- 单元测试 ---
