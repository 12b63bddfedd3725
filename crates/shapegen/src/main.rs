//! shapegen - generate TypeScript and Go sources from serde data shapes.
//!
//! Thin entry point; argument parsing and commands live in `shapegen-cli`.

fn main() {
    let code = shapegen_cli::run(std::env::args().collect());
    std::process::exit(code);
}
