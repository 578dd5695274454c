use crate::card::{cards_to_string, Card};
use crate::combo::{dominates, validate, Strength};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 队伍。0、2、4 号座位是一队，1、3、5 号座位是二队，开局后不再变化。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn of_seat(seat: usize) -> Team {
        if seat % 2 == 0 { Team::One } else { Team::Two }
    }

    /// 本队的三个座位
    pub fn seats(self) -> [usize; 3] {
        match self {
            Team::One => [0, 2, 4],
            Team::Two => [1, 3, 5],
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

/// 出牌类型，按张数区分。`Pass` 表示不出。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum ShotKind {
    Pass,
    Single,
    Pair,
    Triple,
    Five,
}

impl ShotKind {
    pub fn size(self) -> usize {
        match self {
            ShotKind::Pass => 0,
            ShotKind::Single => 1,
            ShotKind::Pair => 2,
            ShotKind::Triple => 3,
            ShotKind::Five => 5,
        }
    }

    /// 张数对应的出牌类型，只有 1/2/3/5 张能出
    pub fn from_size(size: usize) -> Result<ShotKind, GameError> {
        match size {
            1 => Ok(ShotKind::Single),
            2 => Ok(ShotKind::Pair),
            3 => Ok(ShotKind::Triple),
            5 => Ok(ShotKind::Five),
            n => Err(GameError::BadCardCount(n)),
        }
    }
}

/// 一次出牌 (Shot)：一组牌或者 pass，附带出牌方的队伍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub cards: Vec<Card>,
    pub kind: ShotKind,
    pub team: Team,
}

impl Shot {
    pub fn pass(team: Team) -> Shot {
        Shot { cards: Vec::new(), kind: ShotKind::Pass, team }
    }

    /// 构造一手真正出的牌，牌型不合法时报错
    pub fn play(mut cards: Vec<Card>, team: Team) -> Result<Shot, GameError> {
        let kind = ShotKind::from_size(cards.len())?;
        validate(&cards)?;
        cards.sort();
        Ok(Shot { cards, kind, team })
    }

    pub fn is_pass(&self) -> bool {
        self.kind == ShotKind::Pass
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    pub fn strength(&self) -> Result<Strength, GameError> {
        validate(&self.cards)
    }

    /// 以当前这手牌为擂主，`challenger` 能否压过它
    pub fn is_beaten_by(&self, challenger: &[Card]) -> Result<bool, GameError> {
        dominates(challenger, &self.cards)
    }
}

impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_pass() {
            f.write_str("pass")
        } else {
            f.write_str(&cards_to_string(&self.cards))
        }
    }
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Spade)).collect()
    }

    #[test]
    fn test_teams_by_seat() {
        assert_eq!(Team::of_seat(0), Team::One);
        assert_eq!(Team::of_seat(3), Team::Two);
        assert!(Team::One.seats().iter().all(|&s| Team::of_seat(s) == Team::One));
        assert!(Team::Two.seats().iter().all(|&s| Team::of_seat(s) == Team::Two));
    }

    #[test]
    fn test_play_validates() {
        let shot = Shot::play(cards(&[Rank::Eight, Rank::Eight]), Team::One).unwrap();
        assert_eq!(shot.kind, ShotKind::Pair);
        assert_eq!(shot.to_string(), "88");

        assert_eq!(
            Shot::play(cards(&[Rank::Eight; 4]), Team::One),
            Err(GameError::BadCardCount(4))
        );
        assert!(Shot::play(cards(&[Rank::Eight, Rank::Nine]), Team::One).is_err());
        assert_eq!(Shot::play(vec![], Team::Two), Err(GameError::BadCardCount(0)));
    }

    #[test]
    fn test_pass() {
        let shot = Shot::pass(Team::Two);
        assert!(shot.is_pass());
        assert_eq!(shot.size(), 0);
        assert_eq!(shot.to_string(), "pass");
    }

    #[test]
    fn test_pair_of_eights_beats_sevens() {
        let standing = Shot::play(cards(&[Rank::Seven, Rank::Seven]), Team::Two).unwrap();
        assert_eq!(standing.is_beaten_by(&cards(&[Rank::Eight, Rank::Eight])), Ok(true));
        assert_eq!(standing.is_beaten_by(&cards(&[Rank::Seven, Rank::Seven])), Ok(false));
        assert!(standing.is_beaten_by(&cards(&[Rank::Eight])).is_err());
    }
}
