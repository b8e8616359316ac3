use crate::{
    components::{alert::Notice, table, table::OutputFormat},
    features::auth::{
        state::{SessionContext, SessionState},
        types::User,
    },
    routes::{enter, failed, View},
};
use serde::Serialize;

/// Profile of the signed-in user.
pub async fn show(ctx: &SessionContext, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let Some(user) = ctx.user() else {
        return failed("No user profile loaded");
    };

    match format {
        OutputFormat::Json => match table::json(&user) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => View::page(table::details(&[
            ("Name", user.name.clone()),
            ("Phone", user.phone.clone()),
            ("Email", user.email.clone().unwrap_or_else(|| "-".to_string())),
            ("Language", user.language_preference.clone()),
            ("Member since", user.created_at.clone()),
        ])),
    }
}

#[derive(Serialize)]
struct StatusJson {
    authenticated: bool,
    user: Option<User>,
}

/// Re-validates the stored token. A rejected token is dropped by the session.
pub async fn status(ctx: &SessionContext, format: OutputFormat) -> View {
    let authenticated = ctx.check_auth().await == SessionState::Authenticated;
    let user = ctx.user();

    match format {
        OutputFormat::Json => match table::json(&StatusJson {
            authenticated,
            user,
        }) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => match user {
            Some(user) if authenticated => {
                View::page(format!("Signed in as {} ({})", user.name, user.phone))
            }
            _ => View::page("Not signed in")
                .with_notice(Notice::info("Run `smartclaim login` to sign in")),
        },
    }
}
