//! Command parsing
//!
//! Turns a raw command line into a `Command`.

use crate::report::Category;
use crate::session::Role;

#[derive(Debug, PartialEq)]
pub enum Command {
    Login {
        email: String,
        password: String,
        role: Option<Role>,
    },
    Logout,
    Status,
    Visit(String),
    Classify {
        image: String,
        category: Category,
    },
    Help,
    Unknown(String),
}

pub const USAGE: &str = "\
Usage:
  login <email> <password> [user|admin]
  logout
  status
  visit <path>
  classify <image-path> <category>
  help";

// Parse raw command string into Command enum
pub fn parse_command(raw: &str) -> Command {
    let words: Vec<&str> = raw.split_whitespace().collect();
    parse_args(&words)
}

/// Builds a `Command` from already-split arguments, such as process argv.
///
/// Arguments are taken as-is, so a password or path may contain spaces.
pub fn parse_args<S: AsRef<str>>(words: &[S]) -> Command {
    let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    let (cmd, args) = match words.split_first() {
        Some((cmd, args)) => (cmd.to_ascii_lowercase(), args),
        None => (String::new(), &[][..]),
    };
    let unknown = || Command::Unknown(words.join(" "));

    match (cmd.as_str(), args) {
        ("login", [email, password]) => Command::Login {
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        },
        ("login", [email, password, role]) => match role.parse::<Role>() {
            Ok(role) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
                role: Some(role),
            },
            Err(_) => unknown(),
        },
        ("logout", []) => Command::Logout,
        ("status" | "whoami", []) => Command::Status,
        ("visit", [path]) => Command::Visit(path.to_string()),
        ("classify", [image, category]) => match category.parse::<Category>() {
            Ok(category) => Command::Classify {
                image: image.to_string(),
                category,
            },
            Err(_) => unknown(),
        },
        ("help" | "-h" | "--help", _) => Command::Help,
        _ => unknown(),
    }
}
