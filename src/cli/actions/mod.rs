//! Actions produced by argument dispatch. Each one enters a page with a fresh
//! session context and prints the resulting view.

pub mod claims;
pub mod documents;
pub mod policies;
pub mod session;

use crate::{
    cli::globals::GlobalArgs,
    components::alert::{AlertKind, Notice},
    routes::{dashboard, timeline, Route, View},
};
use anyhow::{anyhow, Result};
use uuid::Uuid;

#[derive(Debug)]
pub enum Action {
    Session(session::Command),
    Overview,
    Policies(policies::Command),
    Claims(claims::Command),
    Documents(documents::Command),
    Timeline { claim_id: Uuid },
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the session cannot be set up or the page reports an error.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        let (ctx, navigator) = globals.session_context()?;
        let format = globals.output;

        let view = match self {
            Self::Session(command) => command.execute(&ctx, format).await?,
            Self::Overview => dashboard::overview(&ctx, format).await,
            Self::Policies(command) => command.execute(&ctx, format).await,
            Self::Claims(command) => command.execute(&ctx, format).await,
            Self::Documents(command) => command.execute(&ctx, format).await,
            Self::Timeline { claim_id } => timeline::show(&ctx, claim_id, format).await,
        };

        tracing::debug!(history = ?navigator.history(), "navigation");
        present(view)
    }
}

/// Prints a view: body on stdout, notices on their streams. Error notices
/// become the returned error instead of being printed twice.
///
/// # Errors
/// Returns an error when the view carries error notices or is a redirect.
pub fn present(view: View) -> Result<()> {
    match view {
        View::Loading => {
            Notice::info("Loading...").emit();
            Ok(())
        }
        View::Redirect(Route::Login) => Err(anyhow!(
            "Not signed in. Run `smartclaim login` first."
        )),
        View::Redirect(route) => Err(anyhow!("Redirected to {route}")),
        view @ View::Page { .. } => {
            let error = view.error_message();
            if let View::Page { body, notices } = view {
                if !body.is_empty() {
                    println!("{body}");
                }
                notices
                    .iter()
                    .filter(|notice| notice.kind != AlertKind::Error)
                    .for_each(Notice::emit);
            }
            error.map_or(Ok(()), |message| Err(anyhow!(message)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_turns_error_notices_into_errors() {
        let view = View::page("").with_notice(Notice::error("Failed to load policies"));
        let err = present(view).err().map(|err| err.to_string());
        assert_eq!(err.as_deref(), Some("Failed to load policies"));
    }

    #[test]
    fn present_redirect_to_login_asks_for_sign_in() {
        let err = present(View::Redirect(Route::Login))
            .err()
            .map(|err| err.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Not signed in. Run `smartclaim login` first.")
        );
    }

    #[test]
    fn present_page_without_errors_succeeds() {
        assert!(present(View::page("ok").with_notice(Notice::success("done"))).is_ok());
    }
}
