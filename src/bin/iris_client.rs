//! Iris Client Binary - Signal Message Transmitter
//!
//! Kirim pesan ke server lewat SIGUSR1/SIGUSR2, satu bit per signal,
//! MSB-first, dengan pacing delay antar signal. Berhenti pada kegagalan
//! dispatch pertama.
//!
//! # Usage
//!
//! ```text
//! iris_client <server-pid> <message> [OPTIONS]
//! ```
//!
//! # Options
//!
//! - `--pace MICROS` - Delay antar signal dalam microseconds (default: 100)

use std::process;
use std::time::Duration;

use iris::channel::Sender;
use iris::protocol::BIT_INTERVAL;

struct ClientConfig {
    target_pid: i32,
    message: String,
    pace: Duration,
}

fn print_usage() {
    println!("Iris Client - Signal Message Transmitter\n");
    println!("Usage: iris_client <server-pid> <message> [OPTIONS]\n");
    println!("Options:");
    println!(
        "  --pace MICROS   Delay between signals in microseconds (default: {})",
        BIT_INTERVAL.as_micros()
    );
    println!("  -h, --help      Show this help");
}

fn parse_args() -> ClientConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut positional: Vec<String> = Vec::new();
    let mut pace = BIT_INTERVAL;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pace" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(micros) => pace = Duration::from_micros(micros),
                        Err(_) => {
                            println!("Invalid pace: {}", args[i + 1]);
                            print_usage();
                            process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }

    if positional.len() != 2 {
        print_usage();
        process::exit(1);
    }

    let target_pid = match positional[0].parse::<i32>() {
        Ok(pid) if pid > 0 => pid,
        _ => {
            println!("Invalid server pid: {}", positional[0]);
            print_usage();
            process::exit(1);
        }
    };

    ClientConfig {
        target_pid,
        message: positional.remove(1),
        pace,
    }
}

fn main() {
    let config = parse_args();

    let sender = Sender::new(config.target_pid).with_pace(config.pace);
    if let Err(e) = sender.send(config.message.as_bytes()) {
        eprintln!("iris_client: {}", e);
        process::exit(1);
    }
}
