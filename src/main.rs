use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use vaultaudit::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Audit {
            ref file,
            ref format,
            ref now,
            no_history,
        } => vaultaudit::cli::commands::audit_cmd::execute(
            &cli,
            file,
            format.as_deref(),
            now.as_deref(),
            no_history,
        ),
        Commands::Check { ref password } => {
            vaultaudit::cli::commands::check::execute(password.as_deref())
        }
        Commands::Seal {
            ref file,
            ref output,
        } => vaultaudit::cli::commands::seal::execute(file, output.as_deref()),
        Commands::Keygen => vaultaudit::cli::commands::keygen::execute(),
        Commands::History { last, ref since } => history(&cli, last, since.as_deref()),
        Commands::Completions { ref shell } => {
            vaultaudit::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        vaultaudit::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--format json` output stays clean on stdout.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(feature = "history")]
fn history(cli: &Cli, last: usize, since: Option<&str>) -> vaultaudit::errors::Result<()> {
    vaultaudit::cli::commands::history_cmd::execute(cli, last, since)
}

#[cfg(not(feature = "history"))]
fn history(_: &Cli, _: usize, _: Option<&str>) -> vaultaudit::errors::Result<()> {
    Err(vaultaudit::errors::VaultAuditError::CommandFailed(
        "built without the `history` feature".into(),
    ))
}
