//! Access commands: role visibility table and credential check.

use std::io::BufRead;

use secrecy::SecretString;

use farmalink_core::Role;
use farmalink_panel::services::{SessionStore, allowed_sections};
use farmalink_panel::storage::MemorySlots;

use super::CommandError;

/// Print the sections `role` may open, in menu order.
#[allow(clippy::print_stdout)]
pub fn sections(role: Option<&str>) -> Result<(), CommandError> {
    let role = role
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;

    for key in allowed_sections(role) {
        println!("{} {:<12} {}", key.icon(), key.as_str(), key.label());
    }
    Ok(())
}

/// Read the password from the first line of `input`.
pub fn read_password(mut input: impl BufRead) -> Result<SecretString, CommandError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    Ok(SecretString::from(password.to_owned()))
}

/// Check a credential against the built-in table and print the role.
#[allow(clippy::print_stdout)]
pub fn check_login(email: &str, password: &SecretString) -> Result<(), CommandError> {
    let store = SessionStore::new(MemorySlots::new());
    let identity = store.login(email, password)?;
    println!("{} ({})", identity.email, identity.role);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn password_line_is_trimmed_of_newline_only() {
        use secrecy::ExposeSecret;

        let password = read_password(" adm123 \n".as_bytes()).unwrap();
        assert_eq!(password.expose_secret(), " adm123 ");
    }

    #[test]
    fn check_login_uses_builtin_table() {
        let ok = SecretString::from("empleado123".to_owned());
        assert!(check_login("Empleado@gmail.com", &ok).is_ok());

        let wrong = SecretString::from("nope".to_owned());
        assert!(matches!(
            check_login("Empleado@gmail.com", &wrong),
            Err(CommandError::Login(_))
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(sections(Some("superuser")).is_err());
        assert!(sections(None).is_ok());
    }
}
