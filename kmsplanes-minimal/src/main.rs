//! Minimal plane format lister

use std::process;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| kmsprobe::DEFAULT_DEVICE.to_string());

    let result = kmsprobe::Card::open(&path)
        .and_then(|card| kmsprobe::list_planes(&card, &mut std::io::stdout().lock()));

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        process::exit(e.exit_code());
    }
}
