use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shell command a petal hands back to the host when tapped.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct TapCommand(String);

sepal::impl_string_newtype!(TapCommand);

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("empty command")]
    Empty,
    #[error("malformed command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Checks that the command is non-empty and shell-parseable.
pub fn validate(command: &TapCommand) -> Result<(), ActionError> {
    let words = shell_words::split(command.as_ref())?;
    if words.is_empty() {
        return Err(ActionError::Empty);
    }
    Ok(())
}

/// Spawns the command detached, with stdio discarded.
pub fn spawn(command: &TapCommand) -> Result<(), ActionError> {
    validate(command)?;

    std::process::Command::new("sh")
        .arg("-c")
        .arg(command.as_ref())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_command_validates() {
        assert!(validate(&TapCommand::new("echo hello")).is_ok());
    }

    #[test]
    fn unbalanced_quote_is_rejected() {
        assert!(matches!(
            validate(&TapCommand::new("echo 'unclosed")),
            Err(ActionError::Parse(_))
        ));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            validate(&TapCommand::new("   ")),
            Err(ActionError::Empty)
        ));
    }
}
