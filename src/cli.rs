use clap::{Parser, Subcommand};
use hashledger::chain::{BlockView, Ledger};
use hashledger::config::Config;
use hashledger::error::{Error, Result};
use hashledger::tx::Amount;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "hashledger")]
#[command(about = "Hashledger CLI - append-only proof-of-work ledger with tamper detection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long, default_value = "human")]
    pub format: String,

    /// Mining difficulty: required leading '0' hex characters
    /// (overrides the HASHLEDGER_DIFFICULTY environment variable)
    #[arg(short, long)]
    pub difficulty: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scripted walkthrough: mine two blocks, tamper, re-verify
    Demo,

    /// Submit transactions, mine one block, list the chain, verify
    Run {
        /// Transaction as "sender:recipient:value", repeatable
        #[arg(short, long = "tx")]
        txs: Vec<String>,

        /// Mine one additional block with an empty pool after the
        /// transaction block
        #[arg(long)]
        mine_empty: bool,
    },
}

/// Resolve the effective config: a command-line difficulty wins over the
/// `HASHLEDGER_DIFFICULTY` environment override, which wins over the
/// default.
fn resolve_config(format: &str, difficulty: Option<u32>) -> Config {
    let mut config = Config::from_env();
    if let Some(difficulty) = difficulty {
        config.set_difficulty(difficulty);
    }
    if format == "json" {
        config.set_output_format("json".to_string());
    }
    config
}

/// Parse a "sender:recipient:value" triple from the command line.
fn parse_tx(raw: &str) -> Result<(String, String, Amount)> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(sender), Some(recipient), Some(value)) => {
            let amount: Amount = value.parse().map_err(Error::InvalidTransaction)?;
            Ok((sender.to_string(), recipient.to_string(), amount))
        }
        _ => Err(Error::InvalidTransaction(format!(
            "expected sender:recipient:value, got {:?}",
            raw
        ))),
    }
}

/// Format output based on format type
fn format_output<T: Serialize + std::fmt::Debug>(data: &T, format: &str) -> String {
    match format {
        "json" => serde_json::to_string_pretty(data)
            .unwrap_or_else(|_| format!("{:?}", data)),
        _ => format!("{:#?}", data),
    }
}

fn print_block_human(view: &BlockView) {
    println!("Block {}:", view.height);
    println!("Timestamp: {}", view.timestamp);
    println!("Nonce: {}", view.nonce);
    println!("Previous Hash: {}", view.pre_block_hash);
    println!("Hash: {}", view.hash);
    for tx in &view.transactions {
        println!("  {} -> {}  {}  [{}]", tx.sender, tx.recipient, tx.value, tx.id);
    }
    println!("{}", "-".repeat(50));
}

fn print_chain(ledger: &Ledger, format: &str) {
    let views = ledger.list_blocks();
    if format == "json" {
        println!("{}", format_output(&views, format));
    } else {
        for view in &views {
            print_block_human(view);
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.format, cli.difficulty);
    let format = config.get_output_format().to_string();

    match cli.command {
        Commands::Demo => {
            let mut ledger = Ledger::new(config.get_difficulty());

            ledger.submit_transaction("Alice".into(), "Bob".into(), Amount::from_minor(100))?;
            ledger.submit_transaction("Charlie".into(), "Dave".into(), Amount::from_minor(250))?;
            ledger.mine_block();

            ledger.submit_transaction("Eve".into(), "Frank".into(), Amount::from_minor(75))?;
            ledger.mine_block();

            print_chain(&ledger, &format);
            println!("{}", ledger.verify_chain());

            println!("Tampering: block 1, transaction 0, recipient -> \"Mallory\"");
            ledger.tamper(1, 0, "Mallory")?;
            println!("{}", ledger.verify_chain());

            Ok(())
        }

        Commands::Run { txs, mine_empty } => {
            let mut ledger = Ledger::new(config.get_difficulty());

            for raw in &txs {
                let (sender, recipient, amount) = parse_tx(raw)?;
                ledger.submit_transaction(sender, recipient, amount)?;
            }
            ledger.mine_block();
            if mine_empty {
                ledger.mine_block();
            }

            print_chain(&ledger, &format);
            println!("{}", ledger.verify_chain());

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashledger::config::DEFAULT_DIFFICULTY;

    #[test]
    fn test_parse_tx_triple() {
        let (sender, recipient, amount) = parse_tx("Alice:Bob:1.00").unwrap();
        assert_eq!(sender, "Alice");
        assert_eq!(recipient, "Bob");
        assert_eq!(amount, Amount::from_minor(100));
    }

    #[test]
    fn test_parse_tx_rejects_malformed() {
        assert!(parse_tx("Alice:Bob").is_err());
        assert!(parse_tx("Alice:Bob:abc").is_err());
    }

    // Single test for both precedence cases: parallel test threads must
    // not race on the environment variable.
    #[test]
    fn test_difficulty_precedence() {
        std::env::set_var("HASHLEDGER_DIFFICULTY", "5");
        let from_env_only = resolve_config("human", None);
        let flag_wins = resolve_config("human", Some(3));
        std::env::remove_var("HASHLEDGER_DIFFICULTY");
        let default_only = resolve_config("human", None);

        assert_eq!(from_env_only.get_difficulty(), 5);
        assert_eq!(flag_wins.get_difficulty(), 3);
        assert_eq!(default_only.get_difficulty(), DEFAULT_DIFFICULTY);
    }

    #[test]
    fn test_run_parses_mine_empty_flag() {
        let cli = Cli::try_parse_from([
            "hashledger",
            "run",
            "--tx",
            "Alice:Bob:1.00",
            "--mine-empty",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { txs, mine_empty } => {
                assert_eq!(txs, ["Alice:Bob:1.00"]);
                assert!(mine_empty);
            }
            _ => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn test_json_format_flows_into_config() {
        let config = resolve_config("json", None);
        assert_eq!(config.get_output_format(), "json");
    }
}
