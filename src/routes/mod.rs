//! Dashboard routes and the terminal pages behind them. Each page takes the
//! injected [`SessionContext`](crate::features::auth::state::SessionContext),
//! runs the auth guard where required and returns a [`View`].

pub mod claim_detail;
pub mod claims;
pub mod dashboard;
pub mod documents;
pub mod login;
pub mod policies;
pub mod register;
pub mod settings;
pub mod timeline;

use crate::{
    components::alert::{AlertKind, Notice},
    features::auth::{
        guards::{require_auth, GuardOutcome},
        state::SessionContext,
    },
};
use std::{
    fmt,
    sync::{Mutex, PoisonError},
};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Overview,
    Policies,
    Claims,
    ClaimDetail(Uuid),
    Documents,
    Settings,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Overview => "/app".to_string(),
            Self::Policies => "/app/policies".to_string(),
            Self::Claims => "/app/claims".to_string(),
            Self::ClaimDetail(id) => format!("/app/claims/{id}"),
            Self::Documents => "/app/documents".to_string(),
            Self::Settings => "/app/settings".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receiver of route changes.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    /// Route most recently navigated to, if any.
    fn current(&self) -> Option<Route>;
}

/// Navigator that records every route change in order.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }

    fn current(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

/// What a page produced.
#[derive(Debug)]
pub enum View {
    /// The session is still resolving.
    Loading,
    /// The guard sent the user elsewhere.
    Redirect(Route),
    Page { body: String, notices: Vec<Notice> },
}

impl View {
    #[must_use]
    pub fn page(body: impl Into<String>) -> Self {
        Self::Page {
            body: body.into(),
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_notice(self, notice: Notice) -> Self {
        match self {
            Self::Page { body, mut notices } => {
                notices.push(notice);
                Self::Page { body, notices }
            }
            other => other,
        }
    }

    /// Error notices joined into one line, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let Self::Page { notices, .. } = self else {
            return None;
        };
        let errors: Vec<&str> = notices
            .iter()
            .filter(|notice| notice.kind == AlertKind::Error)
            .map(|notice| notice.message.as_str())
            .collect();
        (!errors.is_empty()).then(|| errors.join("; "))
    }
}

/// Runs the auth guard for a dashboard page; `Err` carries the view to show instead.
pub(crate) async fn enter(ctx: &SessionContext) -> Result<(), View> {
    match require_auth(ctx).await {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::Loading => Err(View::Loading),
        GuardOutcome::Redirect(route) => Err(View::Redirect(route)),
    }
}

/// Page showing only an error notice.
pub(crate) fn failed(message: impl Into<String>) -> View {
    View::page(String::new()).with_notice(Notice::error(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_paths() {
        let id = Uuid::nil();
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Overview.path(), "/app");
        assert_eq!(
            Route::ClaimDetail(id).path(),
            "/app/claims/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn history_navigator_records_in_order() {
        let navigator = HistoryNavigator::default();
        assert_eq!(navigator.current(), None);
        navigator.navigate(Route::Claims);
        navigator.navigate(Route::Login);
        assert_eq!(navigator.history(), vec![Route::Claims, Route::Login]);
        assert_eq!(navigator.current(), Some(Route::Login));
    }

    #[test]
    fn error_message_joins_error_notices_only() {
        let view = View::page("body")
            .with_notice(Notice::success("saved"))
            .with_notice(Notice::error("first"))
            .with_notice(Notice::error("second"));
        assert_eq!(view.error_message().as_deref(), Some("first; second"));
        assert_eq!(View::Loading.error_message(), None);
    }
}
