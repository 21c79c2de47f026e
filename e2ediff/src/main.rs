fn main() {
    if let Err(e) = e2ediff_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
