use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    storefront_cli::run()
}
