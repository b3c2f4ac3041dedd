fn main() {
    if let Err(err) = inkprof_cli::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
