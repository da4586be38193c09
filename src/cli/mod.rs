use clap::{Parser, Subcommand};

mod batch;
mod error;
mod write;

pub use self::error::Error;

use self::batch::BatchArgs;
use self::write::WriteArgs;

/// File creator - write line-based text files into a directory
///
/// Creates the output directory if needed, then writes each line to the file.
#[derive(Parser, Debug)]
#[command(name = "file-creator")]
#[command(about = "Write line-based text files into a directory", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one file from command-line arguments or an input stream
    Write(WriteArgs),
    /// Create every file described by a stream of JSON requests
    Batch(BatchArgs),
}

pub fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Write(args) => args.handle(),
        Command::Batch(args) => args.handle(),
    }
}

/// Open `path` for reading, treating `None` and `-` as stdin
fn open_input(path: Option<&std::path::Path>) -> Result<Box<dyn std::io::Read>, Error> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(Box::new(std::fs::File::open(path)?)),
        _ => Ok(Box::new(std::io::stdin())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_write_command() {
        let cli = Cli::try_parse_from([
            "file-creator",
            "-v",
            "write",
            "a.txt",
            "x",
            "y",
            "-d",
            "out",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Write(_)));
    }

    #[test]
    fn test_parse_batch_command() {
        let cli =
            Cli::try_parse_from(["file-creator", "batch", "requests.json", "--format", "json"])
                .unwrap();

        assert!(!cli.verbose);
        assert!(matches!(cli.command, Command::Batch(_)));
    }

    #[test]
    fn test_write_requires_name() {
        assert!(Cli::try_parse_from(["file-creator", "write"]).is_err());
    }
}
