//! Operator commands that run instead of the server.

use std::io::BufRead;

use folio_core::ports::{AuthError, PasswordService};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Serve,
    /// Read a password from stdin and print its `ADMIN_PASSWORD_HASH` value.
    HashPassword,
}

impl Command {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        match args.nth(1).as_deref() {
            None | Some("serve") => Ok(Command::Serve),
            Some("hash-password") => Ok(Command::HashPassword),
            Some(other) => Err(format!(
                "unknown command '{other}', expected 'serve' or 'hash-password'"
            )),
        }
    }
}

/// Hash the first line of `input`.
pub fn hash_password(
    mut input: impl BufRead,
    passwords: &dyn PasswordService,
) -> Result<String, AuthError> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| AuthError::HashingError(e.to_string()))?;
    passwords.hash(line.trim_end_matches(['\r', '\n']))
}

#[cfg(test)]
mod tests {
    use super::*;

    use folio_infra::Argon2PasswordService;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_command_from_args() {
        assert_eq!(Command::from_args(args(&["folio-server"])), Ok(Command::Serve));
        assert_eq!(
            Command::from_args(args(&["folio-server", "hash-password"])),
            Ok(Command::HashPassword)
        );
        assert!(Command::from_args(args(&["folio-server", "migrate"])).is_err());
    }

    #[test]
    fn test_hashed_line_verifies_without_newline() {
        let passwords = Argon2PasswordService::new();
        let hash = hash_password(&b"correct horse\n"[..], &passwords).unwrap();

        assert!(passwords.verify("correct horse", &hash).unwrap());
        assert!(!passwords.verify("correct horse\n", &hash).unwrap());
    }
}
