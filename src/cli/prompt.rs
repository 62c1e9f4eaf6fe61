//! Terminal prompts.

use std::io::{self, BufRead, Write};

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::auth::SignUpProfile;

/// Prompt for one line of visible input.
pub fn prompt_line(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().wrap_err("Failed to flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("Failed to read input")?;
    if read == 0 {
        return Err(eyre!("Input closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt for a password without echo.
pub fn prompt_password(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().wrap_err("Failed to flush stdout")?;
    rpassword::read_password().wrap_err("Failed to read password")
}

pub fn email_or_prompt(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => prompt_line("Email"),
    }
}

/// Collect the sign-up form.
pub fn prompt_sign_up() -> Result<SignUpProfile> {
    let name = prompt_line("Name")?;
    let email = prompt_line("Email")?;
    let password = prompt_password("Password")?;
    let phone = prompt_line("Phone (optional)")?;
    let upi_id = prompt_line("UPI ID (optional)")?;

    Ok(SignUpProfile::new(name, email, password)
        .with_phone(phone)
        .with_upi_id(upi_id))
}
