fn main() {
    if let Err(err) = diffcase::run() {
        eprintln!("{}", diffcase::format_error(&err));
        std::process::exit(1);
    }
}
