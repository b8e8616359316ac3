use crate::{
    api::AppError,
    components::alert::Notice,
    features::auth::{state::SessionContext, types::LoginRequest},
    routes::{failed, Route, View},
};
use secrecy::{ExposeSecret, SecretString};

pub struct LoginForm {
    pub phone: String,
    pub password: SecretString,
}

impl LoginForm {
    /// # Errors
    /// Returns `AppError::Validation` when a field is missing.
    pub fn validate(&self) -> Result<LoginRequest, AppError> {
        if self.phone.trim().is_empty() {
            return Err(AppError::Validation("Phone number is required".to_string()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        Ok(LoginRequest::new(self.phone.trim(), self.password.clone()))
    }
}

/// Signs in and moves to the overview.
pub async fn submit(ctx: &SessionContext, form: &LoginForm) -> View {
    let request = match form.validate() {
        Ok(request) => request,
        Err(err) => return failed(err.user_message()),
    };

    match ctx.login(&request).await {
        Ok(user) => {
            ctx.navigator().navigate(Route::Overview);
            View::page(format!("Signed in as {} ({})", user.name, user.phone))
                .with_notice(Notice::success("Welcome back!"))
        }
        Err(err) => failed(err.user_message()),
    }
}
