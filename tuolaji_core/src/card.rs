use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

// --- 核心数据结构定义 ---

/// 花色 (Suit)
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Spade,   // 黑桃 ♠️
    Heart,   // 红心 ♥️
    Club,    // 梅花 ♣️
    Diamond, // 方块 ♦️
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];
}

/// 点数 (Rank)
/// 判别值就是牌面点数：3 最小，2 记作 15，是普通牌里最大的。
/// 小王 21、大王 22，中间留空，所以王永远连不成顺子。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    SmallJoker = 21,
    BigJoker = 22,
}

impl Rank {
    /// 有花色的 13 个点数，从小到大
    pub const ORDINARY: [Rank; 13] = [
        Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine,
        Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace, Rank::Two,
    ];

    pub const JOKERS: [Rank; 2] = [Rank::SmallJoker, Rank::BigJoker];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// 3..=9 是“小牌”，队友出这些牌时 AI 才会帮着压
    pub fn is_low(self) -> bool {
        (3..=9).contains(&self.value())
    }

    /// 显示用的牌面符号，只跟点数有关，不显示花色
    pub fn token(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "0",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "小",
            Rank::BigJoker => "大",
        }
    }

    /// 输入符号到点数的固定对照表
    pub fn from_token(c: char) -> Option<Rank> {
        Some(match c {
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            '0' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            '2' => Rank::Two,
            '小' => Rank::SmallJoker,
            '大' => Rank::BigJoker,
            _ => return None,
        })
    }
}

/// 单张牌 (Card)
/// 王没有花色，`suit` 为 `None`。
/// 派生的 `Ord` 先比点数再比花色，手牌排序后同点数的牌挨在一起。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        let suit = if rank.is_joker() { None } else { Some(suit) };
        Card { rank, suit }
    }

    pub fn joker(rank: Rank) -> Card {
        Card { rank, suit: None }
    }
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Suit::Spade => "♠️",
            Suit::Heart => "♥️",
            Suit::Club => "♣️",
            Suit::Diamond => "♦️",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", suit, self.rank),
            None => write!(f, "{}", self.rank),
        }
    }
}

/// 把一组牌拼成牌面符号串，例如 `3334444`
pub fn cards_to_string(cards: &[Card]) -> String {
    cards.iter().map(|c| c.rank.token()).collect()
}

/// 带花色的完整写法，给人类玩家看手牌用
pub fn cards_to_pretty_string(cards: &[Card]) -> String {
    cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}

/// 解析玩家输入的牌面串，返回按点数排好序的点数列表。空白字符会被忽略。
pub fn parse_ranks(input: &str) -> Result<Vec<Rank>, InputError> {
    let mut ranks = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Rank::from_token(c).ok_or(InputError::UnknownToken(c)))
        .collect::<Result<Vec<_>, _>>()?;
    ranks.sort();
    Ok(ranks)
}

// --- 牌靴 ---

/// 一局用几副牌
pub const DECKS: usize = 3;
/// 一副牌 13 * 4 + 2 张王
pub const DECK_SIZE: usize = 54;
pub const SHOE_SIZE: usize = DECKS * DECK_SIZE;

/// 创建一副完整的 54 张牌
fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for &rank in &Rank::ORDINARY {
        for &suit in &Suit::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    for &rank in &Rank::JOKERS {
        deck.push(Card::joker(rank));
    }
    deck
}

/// 三副牌按固定顺序摞在一起，洗牌交给调用方
pub fn create_shoe() -> Vec<Card> {
    let mut shoe = Vec::with_capacity(SHOE_SIZE);
    for _ in 0..DECKS {
        shoe.extend(create_deck());
    }
    shoe
}

// --- 单元测试 ---
