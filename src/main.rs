//! CLI tool to lint the configure script of an autotools project.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use atlint::project::{DEPRECATED_CONFIGURE_IN, MISSING_CONFIGURE};
use atlint::{Context, Diagnostic, Registry, ScanOptions, locate_configure_file};

/// Environment variable holding a log filter, e.g. `ATLINT_LOG=atlint=debug`.
const LOG_ENV: &str = "ATLINT_LOG";

#[derive(Parser, Debug)]
#[command(name = "atlint", version, about = "Autotools project linter")]
struct Cli {
    /// Project directory to search for configure.ac or configure.in
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Lint this file instead of searching the project directory
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Only run the named rule (repeatable)
    #[arg(long = "rule", value_name = "NAME")]
    rules: Vec<String>,

    /// List the built-in rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Accept unmatched `)` outside macro calls, e.g. in shell case patterns
    #[arg(long)]
    allow_stray_close: bool,

    /// Print the recognized macro calls instead of linting them
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn build_registry(names: &[String]) -> Result<Registry, atlint::Error> {
    let registry = Registry::builtin()?;
    if names.is_empty() {
        Ok(registry)
    } else {
        registry.only(names)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = match build_registry(&cli.rules) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", Diagnostic::general(e.to_string()));
            return ExitCode::from(2);
        }
    };

    if cli.list_rules {
        for rule in registry.rules() {
            println!("{}", rule.name());
        }
        return ExitCode::SUCCESS;
    }

    let (path, name) = if let Some(path) = cli.file {
        let name = path.display().to_string();
        (path, name)
    } else {
        match locate_configure_file(&cli.dir) {
            Some(found) => {
                if found.deprecated {
                    println!("{}", Diagnostic::general(DEPRECATED_CONFIGURE_IN));
                }
                let name = found.display_name();
                (found.path, name)
            }
            None => {
                println!("{}", Diagnostic::general(MISSING_CONFIGURE));
                return ExitCode::FAILURE;
            }
        }
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{name}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = ScanOptions {
        allow_stray_close: cli.allow_stray_close,
        ..ScanOptions::default()
    };
    let calls = match atlint::parse_configure_with(&content, &options) {
        Ok(calls) => calls,
        Err(e) => {
            eprintln!("{name}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.dump {
        for call in &calls {
            println!("{call} at {}", call.position());
        }
        return ExitCode::SUCCESS;
    }

    for diag in registry.run(&calls, &Context::new(name.as_str())) {
        println!("{diag}");
    }

    ExitCode::SUCCESS
}
