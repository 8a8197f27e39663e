//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    if let Err(err) = itinera_cli::run() {
        if let itinera_cli::CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("itinera: {err}");
        std::process::exit(1);
    }
}
