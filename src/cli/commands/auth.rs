use clap::{Arg, Command};

pub const ARG_PHONE: &str = "phone";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";

fn phone_arg() -> Arg {
    Arg::new(ARG_PHONE)
        .long(ARG_PHONE)
        .help("Phone number; formatting characters are ignored")
        .env("SMARTCLAIM_PHONE")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Password (prompted when omitted)")
        .env("SMARTCLAIM_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in with phone and password")
                .arg(phone_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and sign in")
                .arg(
                    Arg::new(ARG_NAME)
                        .long(ARG_NAME)
                        .help("Full name")
                        .required(true),
                )
                .arg(phone_arg())
                .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("Email address"))
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("settings").about("Show the signed-in user's profile"))
        .subcommand(Command::new("status").about("Check the stored session against the API"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_reads_phone_from_env() {
        temp_env::with_vars(
            [
                ("SMARTCLAIM_PHONE", Some("5551234567")),
                ("SMARTCLAIM_PASSWORD", Some("secret1")),
            ],
            || {
                let matches =
                    subcommands(Command::new("test")).get_matches_from(vec!["test", "login"]);
                let login = matches.subcommand_matches("login");
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(ARG_PHONE)).cloned(),
                    Some("5551234567".to_string())
                );
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(ARG_PASSWORD)).cloned(),
                    Some("secret1".to_string())
                );
            },
        );
    }

    #[test]
    fn status_takes_no_arguments() {
        let matches = subcommands(Command::new("test")).get_matches_from(vec!["test", "status"]);
        assert_eq!(matches.subcommand_name(), Some("status"));
    }

    #[test]
    fn register_requires_name() {
        temp_env::with_var("SMARTCLAIM_PHONE", Some("5551234567"), || {
            let result = subcommands(Command::new("test"))
                .try_get_matches_from(vec!["test", "register"]);
            assert!(result.is_err());
        });
    }
}
