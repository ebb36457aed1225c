use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use tracing_subscriber::EnvFilter;

use nebsh::builtins::default_registry;
use nebsh::computer::Computer;
use nebsh::config::ShellConfig;
use nebsh::report::{Reporter, Severity};
use nebsh::session::User;

/// A simulated in-memory computer shell.
#[derive(Debug, Parser)]
#[command(name = "nebsh", version, about)]
struct Cli {
    /// Run a single command and exit.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Override the initial user name from the config file.
    #[arg(long)]
    user: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Renders reported lines with the shell's color scheme.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => println!("{} {}", "[DEBUG]".black().on_green(), message.green()),
            Severity::Info => println!("{} {}", "[INFO]".black().on_blue(), message.blue()),
            Severity::Warn => println!("{} {}", "[WARN]".black().on_yellow(), message.yellow()),
            Severity::Error => println!("{} {}", "[ERROR]".white().on_red(), message.red()),
            Severity::Plain => println!("{message}"),
            Severity::Control => {
                let _ = execute!(
                    io::stdout(),
                    terminal::Clear(terminal::ClearType::All),
                    cursor::MoveTo(0, 0)
                );
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = ShellConfig::load()?;
    let mut user: User = config.initial_user()?;
    if let Some(name) = cli.user {
        user.name = name;
    }

    let mut computer = Computer::new(default_registry(), user);
    let reporter = ConsoleReporter;

    if let Some(line) = cli.command {
        computer.run_line(&line, &reporter);
        return Ok(());
    }

    if config.show_motd {
        println!("nebsh. Type 'help -a' to list commands, 'exit' to leave.");
    }

    let stdin = io::stdin();
    loop {
        print_prompt(&computer)?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: behave like exit.
            println!();
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        computer.run_line(line, &reporter);
        if computer.session().exit_requested() {
            break;
        }
    }
    Ok(())
}

fn print_prompt(computer: &Computer) -> Result<()> {
    let user = computer.session().current_user().name.clone();
    let path = computer.fs().path_of(computer.session().cwd());
    let mut stdout = io::stdout();
    write!(
        stdout,
        "{} {}:{}$ ",
        "nebsh".magenta().dim(),
        user.green(),
        path.blue()
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_user_and_verbose_flags() {
        let cli = Cli::parse_from(["nebsh", "-c", "ls", "--user", "alice", "-v"]);
        assert_eq!(cli.command.as_deref(), Some("ls"));
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(cli.verbose);
    }

    #[test]
    fn defaults_leave_everything_off() {
        let cli = Cli::parse_from(["nebsh"]);
        assert!(cli.command.is_none());
        assert!(cli.user.is_none());
        assert!(!cli.verbose);
    }
}
