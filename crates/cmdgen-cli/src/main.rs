// cmdgen CLI entry point

use cmdgen_cli::{output, router::CommandRouter};

fn main() {
    // Unit failures are reported in the output; only invalid input,
    // configuration problems and --strict failures change the exit code
    if let Err(e) = CommandRouter::route() {
        output::print_error(&e.user_message());
        std::process::exit(e.exit_code());
    }
}
