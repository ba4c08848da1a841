use crate::types::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};

/// Standardized yes/no prompt used across binaries.
pub fn ask_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let choice = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default_yes)
        .show_default(true)
        .interact()?;
    Ok(choice)
}

/// Masked input for secrets. The answer, empty or not, is returned as typed.
pub fn ask_secret(prompt: &str) -> Result<String> {
    let value = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;
    Ok(value)
}

pub fn ask_line(prompt: &str) -> Result<String> {
    let line: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(line)
}
