use blackjack_table::{Chips, Session, TableConfig};
use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "table", about = "Play blackjack against the dealer in the terminal")]
struct Args {
    /// Starting player balance
    #[arg(long, env = "PLAYER_BALANCE", default_value_t = 100)]
    player_balance: Chips,

    /// Starting dealer balance
    #[arg(long, env = "DEALER_BALANCE", default_value_t = 1000)]
    dealer_balance: Chips,

    /// Wager used by a bare `deal`
    #[arg(long, env = "DEFAULT_WAGER", default_value_t = 10)]
    wager: Chips,

    /// Seed for reproducible shuffles
    #[arg(long, env = "TABLE_SEED")]
    seed: Option<u64>,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = TableConfig {
        player_balance: args.player_balance,
        dealer_balance: args.dealer_balance,
        default_wager: args.wager,
        seed: args.seed,
    };
    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    println!("{}", session.snapshot());
    println!("Commands: deal [wager], hit, stand, quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let mut words = line.split_whitespace();
        let result = match words.next() {
            Some("deal") => match words.next().map(str::parse::<Chips>) {
                None => session.start_round(config.default_wager),
                Some(Ok(wager)) => session.start_round(wager),
                Some(Err(_)) => {
                    println!("Wager must be a whole number");
                    continue;
                }
            },
            Some("hit") => session.hit(),
            Some("stand") => session.stand(),
            Some("quit") | Some("exit") => break,
            Some(other) => {
                println!("Unknown command '{other}'");
                continue;
            }
            None => continue,
        };

        match result {
            Ok(snapshot) => println!("{snapshot}"),
            Err(e) => println!("{e}"),
        }
    }
}
