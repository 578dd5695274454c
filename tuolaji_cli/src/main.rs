use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tuolaji_core::{
    cards_to_pretty_string, cards_to_string, run_game, GameEvent, GameState, HumanInput,
    InputError, NoHumans, TurnPrompt, SEATS,
};

/// 六人三副牌出牌游戏，控制台版
#[derive(Parser, Debug)]
#[command(name = "tuolaji")]
#[command(about = "Six-seat, three-deck shedding card game on the console")]
struct Args {
    /// 洗牌种子，不给时随机生成并写进日志
    #[arg(long)]
    seed: Option<u64>,

    /// 人类玩家的座位号
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..SEATS as i64))]
    human: u8,

    /// 六个座位全部由 AI 出牌
    #[arg(long)]
    ai_only: bool,

    /// 每个事件输出一行 JSON
    #[arg(long)]
    json: bool,

    /// 发牌和每轮开始时打印所有人的手牌
    #[arg(long)]
    show_hands: bool,
}

// --- 控制台输入 ---

/// 从标准输入逐行读取人类玩家的出牌
struct ConsoleInput<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> HumanInput for ConsoleInput<R> {
    fn read_line(&mut self, prompt: &TurnPrompt<'_>) -> io::Result<Option<String>> {
        let mut out = io::stdout().lock();
        writeln!(out, "Your cards: {}", cards_to_pretty_string(prompt.hand))?;
        write!(out, "All 5 combos:")?;
        for combo in &prompt.combos {
            write!(out, " {}", cards_to_string(combo))?;
        }
        writeln!(out)?;
        match prompt.standing {
            Some(standing) => writeln!(out, "Cards to beat: {}, friend={}", standing, prompt.friend)?,
            None => writeln!(out, "New round, you lead")?,
        }
        write!(out, "Player{}> ", prompt.seat)?;
        out.flush()?;

        self.lines.next().transpose()
    }

    fn reject(&mut self, reason: &InputError) {
        println!("无效输入: {}，请重新出牌", reason);
    }
}

// --- 事件输出 ---

fn print_event(event: &GameEvent, args: &Args) {
    if args.json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("事件序列化失败: {}", e),
        }
        return;
    }

    println!("{}", event);
    if args.show_hands {
        for hand in event.hands() {
            println!("{}", hand);
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut state = if args.ai_only {
        GameState::all_ai()
    } else {
        GameState::with_human(usize::from(args.human))
    };
    info!(game_id = %state.game_id, seed, human = ?(!args.ai_only).then_some(args.human), "开始新对局");

    let result = if args.ai_only {
        run_game(&mut state, &mut rng, &mut NoHumans, |e| print_event(e, &args))
    } else {
        let mut input = ConsoleInput { lines: io::stdin().lock().lines() };
        run_game(&mut state, &mut rng, &mut input, |e| print_event(e, &args))
    };

    match result {
        Ok(team) => {
            info!(%team, "对局结束");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("对局中止: {}", e);
            ExitCode::FAILURE
        }
    }
}
