//! CLI module for Splitpay.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Running session commands against the controller
//!
//! # Usage
//!
//! ```ignore
//! use splitpay::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, &services.controller).await?;
//! ```

pub mod args;
pub mod prompt;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use version::{version_string, VERSION};

use color_eyre::eyre::{eyre, Result};

use crate::auth::{AuthResult, Session, SessionController};

/// Handle commands that need no session core.
///
/// Returns `true` if the command was handled here.
pub fn run_local_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            true
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            true
        }
        _ => false,
    }
}

fn describe(user: &Session) -> String {
    format!("{} <{}>", user.name, user.email)
}

/// Turn an auth result into a process outcome, printing on success.
fn report(result: AuthResult, success_line: impl FnOnce() -> String) -> Result<()> {
    match result {
        AuthResult::Success => {
            println!("{}", success_line());
            Ok(())
        }
        AuthResult::Failure(failure) => {
            tracing::debug!(code = failure.error_code(), "Command failed");
            Err(eyre!(failure.message))
        }
    }
}

fn signed_in_line(controller: &SessionController) -> String {
    match controller.user() {
        Some(user) => format!("Signed in as {}", describe(&user)),
        None => "Signed in".to_string(),
    }
}

/// Run a command against the controller.
pub async fn run_cli_command(command: CliCommand, controller: &SessionController) -> Result<()> {
    if run_local_command(&command) {
        return Ok(());
    }

    match command {
        CliCommand::Version | CliCommand::Help => Ok(()),
        CliCommand::Status => {
            controller.bootstrap().await;
            match controller.user() {
                Some(user) => println!("Signed in as {} (id {})", describe(&user), user.id),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        CliCommand::SignIn { email } => {
            let email = prompt::email_or_prompt(email)?;
            let password = prompt::prompt_password("Password")?;
            let result = controller.sign_in(&email, &password).await;
            report(result, || signed_in_line(controller))
        }
        CliCommand::SignInWithGoogle => {
            let result = controller.sign_in_with_google().await;
            report(result, || signed_in_line(controller))
        }
        CliCommand::SignUp => {
            let profile = prompt::prompt_sign_up()?;
            let result = controller.sign_up(&profile).await;
            report(result, || signed_in_line(controller))
        }
        CliCommand::SignOut => {
            controller.sign_out().await;
            println!("Signed out");
            Ok(())
        }
        CliCommand::ForgotPassword { email } => {
            let email = prompt::email_or_prompt(email)?;
            let result = controller.forgot_password(&email).await;
            report(result, || {
                "If that address has an account, a reset email is on its way".to_string()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthFailure;

    #[test]
    fn test_local_commands() {
        assert!(run_local_command(&CliCommand::Version));
        assert!(run_local_command(&CliCommand::Help));
        assert!(!run_local_command(&CliCommand::Status));
        assert!(!run_local_command(&CliCommand::SignOut));
    }

    #[test]
    fn test_report_failure_carries_message() {
        let err = report(
            AuthFailure::rejected("Invalid credentials").into(),
            || unreachable!(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
