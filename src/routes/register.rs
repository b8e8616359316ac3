use crate::{
    api::AppError,
    components::alert::Notice,
    features::auth::{
        state::SessionContext,
        types::{is_valid_email, sanitize_phone, RegisterRequest},
    },
    routes::{failed, Route, View},
};
use secrecy::{ExposeSecret, SecretString};

pub struct RegisterForm {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: SecretString,
}

impl RegisterForm {
    /// # Errors
    /// Returns `AppError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<RegisterRequest, AppError> {
        let name = self.name.trim();
        if name.chars().count() < 2 {
            return Err(invalid("Name must be at least 2 characters"));
        }

        let digits = sanitize_phone(&self.phone).len();
        if !(10..=15).contains(&digits) {
            return Err(invalid("Phone must be 10-15 digits"));
        }

        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty());
        if let Some(email) = email {
            if !is_valid_email(email) {
                return Err(invalid("Invalid email address"));
            }
        }

        if self.password.expose_secret().chars().count() < 6 {
            return Err(invalid("Password must be at least 6 characters"));
        }

        Ok(RegisterRequest {
            name: name.to_string(),
            phone: self.phone.trim().to_string(),
            email: email.map(str::to_string),
            password: self.password.clone(),
        })
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Creates the account, signs in and moves to the overview.
pub async fn submit(ctx: &SessionContext, form: &RegisterForm) -> View {
    let request = match form.validate() {
        Ok(request) => request,
        Err(err) => return failed(err.user_message()),
    };

    match ctx.register(&request).await {
        Ok(user) => {
            ctx.navigator().navigate(Route::Overview);
            View::page(format!("Signed in as {} ({})", user.name, user.phone))
                .with_notice(Notice::success("Account created successfully!"))
        }
        Err(err) => failed(err.user_message()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            name: "Asha".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: Some(" ".to_string()),
            password: SecretString::from("secret1".to_string()),
        }
    }

    fn message(form: &RegisterForm) -> String {
        form.validate().unwrap_err().user_message()
    }

    #[test]
    fn valid_form_drops_blank_email() {
        let request = form().validate().unwrap();
        assert_eq!(request.email, None);
        assert_eq!(request.sanitized().phone, "5551234567");
    }

    #[test]
    fn each_rule_has_its_message() {
        let mut bad = form();
        bad.name = "A".to_string();
        assert_eq!(message(&bad), "Name must be at least 2 characters");

        let mut bad = form();
        bad.phone = "12345".to_string();
        assert_eq!(message(&bad), "Phone must be 10-15 digits");

        let mut bad = form();
        bad.email = Some("asha@".to_string());
        assert_eq!(message(&bad), "Invalid email address");

        let mut bad = form();
        bad.password = SecretString::from("12345".to_string());
        assert_eq!(message(&bad), "Password must be at least 6 characters");
    }
}
