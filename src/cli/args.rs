//! Command-line argument parsing for the Splitpay CLI.

use thiserror::Error;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show who is signed in (default)
    Status,
    /// Sign in with email and password; prompts for what is missing
    SignIn { email: Option<String> },
    /// Sign in through Google
    SignInWithGoogle,
    /// Create an account interactively
    SignUp,
    /// Sign out
    SignOut,
    /// Request a password reset email
    ForgotPassword { email: Option<String> },
    /// Show version information
    Version,
    /// Show usage
    Help,
}

/// Argument errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}' (try --help)")]
    UnknownCommand(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

pub const USAGE: &str = "\
Usage: splitpay [COMMAND]

Commands:
  status                    Show the signed-in user (default)
  sign-in [EMAIL]           Sign in with email and password
  sign-in --google          Sign in with Google
  sign-up                   Create an account
  sign-out                  Sign out
  forgot-password [EMAIL]   Send a password reset email

Options:
  version, -V, --version    Print version
  -h, --help                Print help";

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use splitpay::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["splitpay".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return Ok(CliCommand::Status);
    };

    let command = match first.as_str() {
        "--version" | "-V" | "version" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "status" => CliCommand::Status,
        "sign-in" | "login" => match args.next() {
            Some(flag) if flag == "--google" => CliCommand::SignInWithGoogle,
            email => CliCommand::SignIn { email },
        },
        "sign-up" | "register" => CliCommand::SignUp,
        "sign-out" | "logout" => CliCommand::SignOut,
        "forgot-password" => CliCommand::ForgotPassword { email: args.next() },
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    match args.next() {
        Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
        None => Ok(command),
    }
}
