//! Standalone capture dump tool
//!
//! Decodes a `.sr` capture and prints one line per sample with the level of
//! every channel.
//!
//! Usage:
//!   dump_capture <capture.sr> [--limit <count>]

use sr_log_decoder::DecodedCapture;
use std::env;
use std::path::PathBuf;

fn print_header(capture: &DecodedCapture) {
    print!("{:>10}", "sample");
    for channel in capture.channels() {
        print!(" {:>6}", channel.name);
    }
    println!();
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        let program = args.first().map_or("dump_capture", String::as_str);
        eprintln!("Usage: {} <capture.sr> [--limit <count>]", program);
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let mut limit: u64 = 64;
    let mut i = 2;
    while i < args.len() {
        if args[i] == "--limit" && i + 1 < args.len() {
            limit = args[i + 1].parse().unwrap_or(limit);
            i += 2;
        } else {
            eprintln!("Unknown argument: {}", args[i]);
            std::process::exit(1);
        }
    }

    let capture = match sr_log_decoder::open(&path) {
        Ok(capture) => capture,
        Err(e) => {
            eprintln!("Failed to decode {:?}: {}", path, e);
            std::process::exit(1);
        }
    };

    println!(
        "{:?}: {} channels, unitsize {}, {} samples\n",
        path,
        capture.channel_count(),
        capture.unit_size(),
        capture.sample_count()
    );

    print_header(&capture);
    for sample in 0..capture.sample_count().min(limit) {
        print!("{:>10}", sample);
        for channel in capture.channels() {
            let level = channel
                .bit_position()
                .and_then(|bit| capture.sample_value(bit, sample).ok());
            match level {
                Some(true) => print!(" {:>6}", 1),
                Some(false) => print!(" {:>6}", 0),
                None => print!(" {:>6}", "?"),
            }
        }
        println!();
    }

    capture.close();
}
