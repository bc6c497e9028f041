//! Iris Server Binary - Signal Message Receiver
//!
//! Receiver untuk pesan berbasis SIGUSR1/SIGUSR2:
//! - Publish PID sekali di startup, setelah handler terpasang
//! - Handler hanya enqueue event; assembly jalan di main loop
//! - Block selamanya, print setiap pesan sebagai satu baris di stdout
//!
//! Usage:
//!   cargo run --release --bin iris_server [OPTIONS]
//!
//! # Options
//!
//! - `--verbose` - Print per-message stats ke stderr

use std::io;
use std::process;

use iris::channel::{own_pid, ChannelError, Listener};

/// Server configuration
struct ServerConfig {
    verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

fn print_usage() {
    println!("Iris Server - Signal Message Receiver\n");
    println!("Usage: iris_server [OPTIONS]\n");
    println!("Options:");
    println!("  -v, --verbose   Print per-message stats to stderr");
    println!("  -h, --help      Show this help");
}

fn parse_args() -> ServerConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = ServerConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                println!("Unknown option: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    config
}

/// Drain + suspend loop dengan stats line setiap kali ada pesan keluar
fn run_verbose<W: io::Write>(listener: &mut Listener, out: &mut W) -> Result<(), ChannelError> {
    let wait = listener.block_events()?;
    loop {
        if listener.poll(out)? > 0 {
            let s = listener.stats();
            eprintln!(
                "[stats] messages={} bytes={} events={} dropped={} forced_flushes={}",
                s.messages_emitted, s.bytes_emitted, s.events_consumed, s.events_dropped,
                s.forced_flushes
            );
        }
        wait.wait();
    }
}

fn main() {
    let config = parse_args();

    let mut listener = match Listener::install() {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("iris_server: {}", e);
            process::exit(1);
        }
    };

    if config.verbose {
        eprintln!("🛰  Iris server ready - send with: iris_client <pid> <message>");
    }

    // Handler sudah terpasang: event apa pun setelah baris ini tercatat
    println!("{}", own_pid());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if config.verbose {
        run_verbose(&mut listener, &mut out)
    } else {
        listener.run(&mut out)
    };

    if let Err(e) = result {
        eprintln!("iris_server: {}", e);
        process::exit(1);
    }
}
