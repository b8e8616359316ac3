use crate::{
    features::auth::state::{Session, SessionContext, SessionState},
    routes::Route,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Allow,
    Redirect(Route),
}

/// Evaluates a session snapshot. Nothing is cached between calls.
#[must_use]
pub fn evaluate(session: &Session) -> GuardOutcome {
    match session.state {
        SessionState::Uninitialized | SessionState::Initializing => GuardOutcome::Loading,
        SessionState::Authenticated if session.is_authenticated => GuardOutcome::Allow,
        SessionState::Authenticated | SessionState::Unauthenticated => {
            GuardOutcome::Redirect(Route::Login)
        }
    }
}

/// Resolves the session if nobody has yet, then gates the route. A redirect is
/// also sent to the navigator unless it is already on the login route.
pub async fn require_auth(ctx: &SessionContext) -> GuardOutcome {
    if ctx.state() == SessionState::Uninitialized {
        ctx.init_auth().await;
    }

    // UX-only guard; real access control lives on the API.
    let outcome = evaluate(&ctx.snapshot());
    if let GuardOutcome::Redirect(route) = outcome {
        if ctx.navigator().current() != Some(route) {
            ctx.navigator().navigate(route);
        }
    }
    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        api::{ApiConfig, MemoryTokenStore},
        routes::{HistoryNavigator, Navigator},
    };
    use std::sync::Arc;

    fn session(state: SessionState, is_authenticated: bool) -> Session {
        Session {
            state,
            is_authenticated,
            ..Session::default()
        }
    }

    #[test]
    fn loading_while_unresolved() {
        assert_eq!(
            evaluate(&session(SessionState::Uninitialized, false)),
            GuardOutcome::Loading
        );
        assert_eq!(
            evaluate(&session(SessionState::Initializing, false)),
            GuardOutcome::Loading
        );
    }

    #[test]
    fn allow_only_when_authenticated() {
        assert_eq!(
            evaluate(&session(SessionState::Authenticated, true)),
            GuardOutcome::Allow
        );
        assert_eq!(
            evaluate(&session(SessionState::Unauthenticated, false)),
            GuardOutcome::Redirect(Route::Login)
        );
    }

    #[tokio::test]
    async fn require_auth_redirects_without_token() {
        let navigator = Arc::new(HistoryNavigator::default());
        let ctx = SessionContext::new(
            ApiConfig::with_base_url("http://127.0.0.1:9"),
            Arc::new(MemoryTokenStore::default()),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        )
        .unwrap();

        assert_eq!(require_auth(&ctx).await, GuardOutcome::Redirect(Route::Login));
        assert_eq!(require_auth(&ctx).await, GuardOutcome::Redirect(Route::Login));
        assert_eq!(navigator.history(), vec![Route::Login]);
    }
}
