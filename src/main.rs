// src/main.rs
// =============================================================================
// This is the entry point of the doclinks CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the run context (branch, base URL, documents in scope)
// 3. Check every link and print the report (table, or JSON with --json)
// 4. Exit with proper code (0 = success, 1 = broken links, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use tracing::error;

use cli::Cli;
use doclinks::checker::ReqwestProbe;
use doclinks::git::CommandGit;
use doclinks::logging::{init_logging, level_for};
use doclinks::output::{note, write_report};
use doclinks::{runner, CiEnv, RunContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json, level_for(cli.verbose));

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Fatal: no meaningful report could be produced
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err = the run could not be completed
async fn run(cli: Cli) -> Result<i32> {
    let config = cli.to_config();
    let env = CiEnv::from_env();
    let git = CommandGit::new(&config.root);

    let ctx = RunContext::build(&config, &git, &env).context("failed to determine what to check")?;

    for skipped in &ctx.scope.skipped {
        note(
            cli.json,
            &format!(
                "⏭️  Skipping link checking of {} because it is not changed in this branch",
                skipped.path.display()
            ),
        );
    }

    if ctx.scope.documents.is_empty() {
        note(cli.json, "✅ No documents in scope, nothing to check");
    } else {
        note(
            cli.json,
            &format!("📄 Checking links in {} document(s)", ctx.scope.documents.len()),
        );
    }

    // An empty scope still goes through the runner so --json always gets a report
    let probe = ReqwestProbe::new(config.timeout)?;
    let report = runner::run(&ctx, &config, &probe).await?;

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &report, cli.json)?;

    if report.passed() {
        Ok(0) // Exit code 0 = all good
    } else {
        Ok(1) // Exit code 1 = broken links found
    }
}
