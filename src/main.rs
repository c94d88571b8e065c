use std::error::Error;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::info;

use cube_ttt::{MCTSConfig, Match, MatchError, Seat, Utility, DEFAULT_ITERATIONS};

/// Play 4×4×4 tic-tac-toe against the MCTS player.
#[derive(Parser, Debug)]
#[command(name = "cube-ttt", version, about)]
struct Args {
    /// Who plays X (moves first)
    #[arg(long, value_enum, default_value_t = SeatArg::Human)]
    plus: SeatArg,

    /// Who plays O
    #[arg(long, value_enum, default_value_t = SeatArg::Ai)]
    minus: SeatArg,

    /// MCTS iterations per AI move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Seed for the AI's random stream
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop each AI search after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SeatArg {
    Human,
    Ai,
}

impl From<SeatArg> for Seat {
    fn from(arg: SeatArg) -> Self {
        match arg {
            SeatArg::Human => Seat::Human,
            SeatArg::Ai => Seat::Ai,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = MCTSConfig::default()
        .with_iterations(args.iterations)
        .with_seed(args.seed);
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit_ms(ms);
    }
    info!("starting game: X={:?}, O={:?}, {:?}", args.plus, args.minus, config);

    let mut game = Match::new(args.plus.into(), args.minus.into(), config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.is_finished() {
        println!("{}", game.state());
        let player = game.current_player();

        match game.current_seat() {
            Seat::Ai => {
                println!("{player} is thinking...");
                let worker = game.spawn_ai()?;
                let mv = loop {
                    if let Some(mv) = worker.try_move()? {
                        break mv;
                    }
                    thread::sleep(Duration::from_millis(10));
                };
                println!("{player} plays {mv} ({:.1}s)", worker.elapsed().as_secs_f64());
                game.submit_ai_move(mv as usize)?;
            }
            Seat::Human => {
                print!("{player} to move, enter a cell index: ");
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    println!();
                    return Err("input closed before the game ended".into());
                };
                let line = line?;
                let Ok(index) = line.trim().parse::<usize>() else {
                    println!("'{}' is not a cell index", line.trim());
                    continue;
                };
                match game.submit_move(index) {
                    Ok(()) => {}
                    Err(MatchError::State(err)) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }

    println!("{}", game.state());
    match game.winner() {
        Some(Utility::Win(player)) => println!("{player} wins"),
        _ => println!("Draw"),
    }
    Ok(())
}
