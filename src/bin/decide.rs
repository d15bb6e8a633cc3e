use abstracted_holdem_cfr::decision::Table;
use abstracted_holdem_cfr::solver::{OpponentType, Solver};
use clap::Parser;
use clap::ValueEnum;
use colored::Colorize;

#[derive(Parser)]
#[command(name = "decide", about = "consults a trained policy for a single runtime decision")]
struct Cli {
    #[arg(long)]
    policy: String,

    /// AI's info-set key so far, e.g. "9K"
    #[arg(long, default_value = "")]
    history: String,

    #[arg(long, value_enum, default_value_t = Opponent::Neutral)]
    opponent: Opponent,

    #[arg(long, default_value_t = 0)]
    round: usize,

    /// the strength/potential byte for this round, e.g. `5` preflop or `C` post-flop
    #[arg(long, default_value = "0")]
    strength_token: char,

    #[arg(long, default_value_t = 6)]
    remaining_opponents: u8,

    #[arg(long, default_value_t = 0)]
    raise_counter: u32,

    #[arg(long, default_value_t = 4)]
    standard: i64,

    #[arg(long, default_value_t = 2)]
    raise_diff: i64,

    #[arg(long, default_value_t = 200)]
    allin_bound: i64,

    #[arg(long, default_value_t = 2)]
    bet_pos: i64,

    #[arg(long, default_value_t = 100)]
    contest_money: i64,

    #[arg(long, default_value_t = 1)]
    sb_bet: i64,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Opponent {
    Pessimistic,
    Neutral,
    Confident,
}

impl From<Opponent> for OpponentType {
    fn from(opponent: Opponent) -> Self {
        match opponent {
            Opponent::Pessimistic => OpponentType::Pessimistic,
            Opponent::Neutral => OpponentType::Neutral,
            Opponent::Confident => OpponentType::Confident,
        }
    }
}

fn main() -> anyhow::Result<()> {
    abstracted_holdem_cfr::init_logging();
    let cli = Cli::parse();

    let solver = Solver::load_policy(&cli.policy, cli.opponent.into(), cli.seed)?;
    let mut table = Table {
        round: cli.round,
        grade: None,
        repeating: false,
        raise_self: 0,
        standard: cli.standard,
        raise_diff: cli.raise_diff,
        allin_bound: cli.allin_bound,
        bet_pos: cli.bet_pos,
        contest_money: cli.contest_money,
        sb_bet: cli.sb_bet,
        strength_token: cli.strength_token as u8,
        remaining_opponents: cli.remaining_opponents,
        raise_counter: cli.raise_counter,
    };

    let (action, bet, history) = solver.get_decision(cli.history.as_bytes(), &mut table, cli.seed);
    println!("{}", format!("{action:?}").bold().green());
    println!("bet: {bet}");
    println!("history: {}", String::from_utf8_lossy(&history));
    Ok(())
}
