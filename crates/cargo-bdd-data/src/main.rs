//! Cargo subcommand that prints the external example data of feature files.
//!
//! Scenario outlines tagged with `@DataSource:<file.csv>` are resolved the
//! same way the test harness resolves them, so the generated `Examples:`
//! tables can be inspected or checked into documentation.

mod cli;
mod config;
mod logging;
mod output;

fn main() -> eyre::Result<()> {
    cli::run()
}
