use thiserror::Error;

/// 牌型判断和对局流程里的错误。
/// 除了 `InputClosed`/`Input` 以外都说明状态不一致，出现就停止对局。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// 张数不是 1/2/3/5
    #[error("牌数不对: {0} 张")]
    BadCardCount(usize),
    /// 五张牌凑不成六种牌型中的任何一种
    #[error("不是合法的五张牌型: {0}")]
    BadFiveCards(String),
    /// 单张、对子、三张里点数不一致
    #[error("点数不一致: {0}")]
    MixedRanks(String),
    #[error("张数不同无法比较: {challenger} 对 {standing}")]
    SizeMismatch { challenger: String, standing: String },
    #[error("状态不一致: {0}")]
    InvariantViolation(String),
    #[error("人类玩家输入已关闭")]
    InputClosed,
    #[error("读取输入失败: {0}")]
    Input(String),
}

impl GameError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        GameError::InvariantViolation(msg.into())
    }
}

/// 人类玩家输入的可恢复错误，提示后重新输入
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("无法识别的牌: {0:?}")]
    UnknownToken(char),
    #[error("没有输入任何牌")]
    Empty,
    #[error("手里没有这些牌")]
    NotInHand,
    #[error("新一轮必须出牌，不能 pass")]
    MustOpen,
    #[error("需要出 {expected} 张，实际 {got} 张")]
    WrongSize { expected: usize, got: usize },
    #[error("没有大过当前的牌")]
    NotLarger,
    #[error(transparent)]
    Invalid(#[from] GameError),
}
