pub mod api;
pub mod auth;
pub mod logging;
pub mod resources;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("smartclaim")
        .about("SmartClaim AI insurance claims dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = api::with_args(command);
    let command = auth::subcommands(command);
    let command = resources::subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "smartclaim");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("SmartClaim AI insurance claims dashboard".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_command_tree_is_consistent() {
        new().debug_assert();
    }

    #[test]
    fn test_claims_create_args() {
        let matches = new().get_matches_from(vec![
            "smartclaim",
            "claims",
            "create",
            "--policy",
            "0b8e0c52-7f5d-4a1e-9c43-6a7b5f7f0a01",
            "--type",
            "motor",
            "--incident-date",
            "2024-01-15",
            "--amount",
            "1500.50",
            "-o",
            "json",
        ]);

        let Some(("claims", claims)) = matches.subcommand() else {
            panic!("expected claims subcommand");
        };
        let Some(("create", create)) = claims.subcommand() else {
            panic!("expected create subcommand");
        };
        assert_eq!(
            create
                .get_one::<String>(resources::ARG_AMOUNT)
                .map(String::as_str),
            Some("1500.50")
        );
        assert_eq!(
            create.get_one::<String>(api::ARG_OUTPUT).map(String::as_str),
            Some("json")
        );
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(new().try_get_matches_from(vec!["smartclaim"]).is_err());
    }
}
