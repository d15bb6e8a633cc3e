use abstracted_holdem_cfr::solver::{OpponentType, Solver};
use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(name = "trainer", about = "trains an MCCFR blueprint for abstracted no-limit hold'em")]
struct Cli {
    #[arg(long, default_value_t = 100_000)]
    iterations: usize,

    #[arg(long, value_enum, default_value_t = Opponent::Neutral)]
    opponent: Opponent,

    #[arg(long, default_value = "policy.bin")]
    policy: String,

    #[arg(long, default_value_t = 6)]
    opponents: u8,

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

    log::info!(
        "training {} iterations against a {:?} opponent prior, {} seats",
        cli.iterations,
        cli.opponent,
        cli.opponents
    );

    let mut solver = Solver::init(cli.opponent.into(), cli.seed);
    solver.run(cli.iterations, cli.opponents);
    solver.save_policy(&cli.policy)?;

    println!(
        "{} info sets trained, saved to {}",
        solver.info_set_count(),
        cli.policy
    );
    Ok(())
}

impl std::fmt::Debug for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Opponent::Pessimistic => "pessimistic",
            Opponent::Neutral => "neutral",
            Opponent::Confident => "confident",
        };
        write!(f, "{s}")
    }
}
