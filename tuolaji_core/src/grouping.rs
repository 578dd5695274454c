use crate::card::Card;
use std::collections::BTreeMap;

/// 王的连续段单独放在这个尺寸类里，不参与五张组合
pub const JOKER_CLASS: usize = 6;

/// 同点数连续段最长只取 5 张，多出来的另起一段
const MAX_RUN: usize = 5;

/// 手牌分组视图：尺寸类 -> 若干同点数连续段
///
/// 尺寸类就是连续段的长度 (1..=5)，王的连续段固定放在 [`JOKER_CLASS`]。
/// 每个类里的连续段按点数从小到大排列。这是临时计算的视图，不保存。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    classes: BTreeMap<usize, Vec<Vec<Card>>>,
}

impl Groups {
    /// 某个尺寸类下的所有连续段，没有时返回空切片
    pub fn class(&self, size: usize) -> &[Vec<Card>] {
        self.classes.get(&size).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 按尺寸类从小到大、类内按点数从小到大遍历 `(尺寸类, 连续段)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Vec<Card>)> {
        self.classes
            .iter()
            .flat_map(|(&class, runs)| runs.iter().map(move |run| (class, run)))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn push(&mut self, class: usize, run: Vec<Card>) {
        self.classes.entry(class).or_default().push(run);
    }

    fn flush(&mut self, run: Vec<Card>) {
        let Some(first) = run.first() else { return };
        let class = if first.rank.is_joker() { JOKER_CLASS } else { run.len() };
        self.push(class, run);
    }
}

/// 把手牌切成同点数的连续段
///
/// 手牌按点数排序后扫描，点数变化时结束当前段。
/// 一段攒够 5 张立即收进 5 类，剩下的同点数牌重新起一段，
/// 所以 12 张 3 会切成 `33333`、`33333`、`33`。
pub fn split_into_groups(hand: &[Card]) -> Groups {
    let mut cards = hand.to_vec();
    cards.sort();

    let mut groups = Groups::default();
    let mut run: Vec<Card> = Vec::with_capacity(MAX_RUN);
    for card in cards {
        if run.first().is_some_and(|first| first.rank != card.rank) {
            groups.flush(std::mem::take(&mut run));
        }
        run.push(card);
        if run.len() == MAX_RUN {
            groups.push(MAX_RUN, std::mem::take(&mut run));
        }
    }
    groups.flush(run);
    groups
}

/// 把手牌拆成一串候选组合，主要用于找五张牌
///
/// 顺序是固定的，AI 总是取第一个能用的：
/// 1. 单张 + 四张（按下标一一配对）
/// 2. 对子 + 三张
/// 3. 现成的五张
/// 4. 王的连续段
/// 5. 没配上对的四张、三张
///
/// 第 4、5 步的候选不足五张，调用方遇到不足五张的候选就应该停止。
pub fn form_five(hand: &[Card]) -> Vec<Vec<Card>> {
    let groups = split_into_groups(hand);
    let mut combos = Vec::new();
    let mut remains = Vec::new();

    pair_up(groups.class(1), groups.class(4), &mut combos, &mut remains);
    pair_up(groups.class(2), groups.class(3), &mut combos, &mut remains);
    combos.extend(groups.class(MAX_RUN).iter().cloned());
    combos.extend(groups.class(JOKER_CLASS).iter().cloned());
    combos.extend(remains);
    combos
}

fn pair_up(
    fillers: &[Vec<Card>],
    bodies: &[Vec<Card>],
    combos: &mut Vec<Vec<Card>>,
    remains: &mut Vec<Vec<Card>>,
) {
    let paired = fillers.len().min(bodies.len());
    for (filler, body) in fillers.iter().zip(bodies) {
        let mut combo = filler.clone();
        combo.extend_from_slice(body);
        combo.sort();
        combos.push(combo);
    }
    remains.extend(bodies[paired..].iter().cloned());
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{cards_to_string, create_shoe, Rank, Suit};
    use crate::combo::validate;
    use proptest::prelude::*;
    use Rank::*;

    fn hand(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Spade)).collect()
    }

    fn strings(runs: &[Vec<Card>]) -> Vec<String> {
        runs.iter().map(|r| cards_to_string(r)).collect()
    }

    #[test]
    fn test_split_singles() {
        let groups = split_into_groups(&hand(&[Five, Three, Four]));
        assert_eq!(strings(groups.class(1)), vec!["3", "4", "5"]);
        assert_eq!(groups.iter().count(), 3);
    }

    #[test]
    fn test_split_triple_and_quad() {
        let groups = split_into_groups(&hand(&[Three, Three, Three, Four, Four, Four, Four]));
        assert_eq!(strings(groups.class(3)), vec!["333"]);
        assert_eq!(strings(groups.class(4)), vec!["4444"]);
        for class in [1, 2, 5, JOKER_CLASS] {
            assert!(groups.class(class).is_empty());
        }
    }

    #[test]
    fn test_split_jokers() {
        let mut cards = hand(&[Three, Three, Three]);
        cards.extend([Card::joker(SmallJoker), Card::joker(BigJoker), Card::joker(SmallJoker)]);
        let groups = split_into_groups(&cards);
        assert_eq!(strings(groups.class(3)), vec!["333"]);
        assert_eq!(strings(groups.class(JOKER_CLASS)), vec!["小小", "大"]);
        assert!(groups.class(1).is_empty());
        assert!(groups.class(2).is_empty());
    }

    #[test]
    fn test_split_caps_runs_at_five() {
        let groups = split_into_groups(&hand(&[Three; 12]));
        assert_eq!(strings(groups.class(5)), vec!["33333", "33333"]);
        assert_eq!(strings(groups.class(2)), vec!["33"]);
        assert!(groups.class(1).is_empty());
    }

    #[test]
    fn test_split_empty_hand() {
        assert!(split_into_groups(&[]).is_empty());
    }

    #[test]
    fn test_form_five_order() {
        let mut cards = hand(&[
            Five, Six, Six, Six, Six, Seven, Seven, Eight, Eight, Eight,
            Nine, Nine, Nine, Nine, Nine, King, King, King, King, Ace, Ace, Ace,
        ]);
        cards.push(Card::joker(BigJoker));
        let combos = form_five(&cards);
        assert_eq!(strings(&combos), vec!["56666", "77888", "99999", "大", "KKKK", "AAA"]);
    }

    #[test]
    fn test_form_five_pairs_smallest_first() {
        let cards = hand(&[Three, Four, Four, Four, Four, Jack, Queen, Queen, Queen, Queen]);
        let combos = form_five(&cards);
        assert_eq!(strings(&combos), vec!["34444", "JQQQQ"]);
    }

    #[test]
    fn test_form_five_leftover_fillers_are_dropped() {
        // 单张比四张多，多出来的单张不进候选
        let cards = hand(&[Three, Five, Six, Six, Six, Six]);
        assert_eq!(strings(&form_five(&cards)), vec!["36666"]);
    }

    #[test]
    fn test_jokers_never_form_five() {
        let cards = [
            Card::joker(SmallJoker), Card::joker(SmallJoker), Card::joker(BigJoker),
        ];
        let combos = form_five(&cards);
        assert_eq!(strings(&combos), vec!["小小", "大"]);
        assert!(combos.iter().all(|c| c.len() != 5));
    }

    proptest! {
        /// 分组前后牌的多重集合不变
        #[test]
        fn prop_split_conserves_cards(cards in prop::sample::subsequence(create_shoe(), 0..60)) {
            let groups = split_into_groups(&cards);
            let mut regrouped: Vec<Card> = groups.iter().flat_map(|(_, run)| run.iter().copied()).collect();
            regrouped.sort();
            let mut expected = cards.clone();
            expected.sort();
            prop_assert_eq!(regrouped, expected);

            for (class, run) in groups.iter() {
                prop_assert!(!run.is_empty() && run.len() <= 5);
                prop_assert!(run.iter().all(|c| c.rank == run[0].rank));
                if run[0].rank.is_joker() {
                    prop_assert_eq!(class, JOKER_CLASS);
                } else {
                    prop_assert_eq!(class, run.len());
                }
            }
        }

        /// 候选里的五张组合都是合法牌型
        #[test]
        fn prop_five_card_candidates_validate(cards in prop::sample::subsequence(create_shoe(), 0..60)) {
            for combo in form_five(&cards).iter().filter(|c| c.len() == 5) {
                prop_assert!(validate(combo).is_ok());
                prop_assert!(combo.iter().all(|c| !c.rank.is_joker()));
            }
        }
    }
}
