fn main() {
    if let Err(error) = menu_icons_cli::run(std::env::args_os()) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
