use std::io;
use std::path::PathBuf;

use clap::Parser;

/// till - interactive store over flat record files
#[derive(Parser, Debug)]
#[command(name = "till")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the record files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for request/result temp files (defaults to the system temp dir)
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Number of worker tasks
    #[arg(long, default_value_t = 2)]
    workers: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    if let Err(e) = till_cli::run(
        &args.data_dir,
        args.temp_dir,
        args.workers,
        &mut input,
        &mut output,
    ) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
