//! # 六人三副牌出牌游戏核心库
//!
//! 这个 `core` crate 包含牌的表示、牌型判断、手牌分组、AI 出牌策略
//! 以及整局的状态机。它不关心输入输出，控制台程序或者测试都可以
//! 通过 [`HumanInput`] 和 [`Shuffle`] 接入。

mod card;
mod combo;
mod error;
mod event;
mod grouping;
mod logic;
mod player;
mod shot;
mod state;

pub use card::*;
pub use combo::*;
pub use error::*;
pub use event::*;
pub use grouping::*;
pub use logic::*;
pub use player::*;
pub use shot::*;
pub use state::*;
