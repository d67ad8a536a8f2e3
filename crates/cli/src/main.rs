//! benchplot entry point.

fn main() {
    if let Err(e) = benchplot_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
