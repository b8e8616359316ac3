use crate::{
    components::{alert::Notice, table::OutputFormat},
    features::auth::state::SessionContext,
    routes::{
        login::{self, LoginForm},
        register::{self, RegisterForm},
        settings, View,
    },
};
use anyhow::{Context, Result};
use secrecy::SecretString;

#[derive(Debug)]
pub enum Command {
    Login {
        phone: String,
        password: Option<SecretString>,
    },
    Register {
        name: String,
        phone: String,
        email: Option<String>,
        password: Option<SecretString>,
    },
    Logout,
    Settings,
    Status,
}

fn password_or_prompt(password: Option<SecretString>) -> Result<SecretString> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ")
            .map(SecretString::from)
            .context("Failed to read password"),
    }
}

impl Command {
    /// # Errors
    /// Returns an error if the password prompt fails.
    pub async fn execute(self, ctx: &SessionContext, format: OutputFormat) -> Result<View> {
        let view = match self {
            Self::Login { phone, password } => {
                let form = LoginForm {
                    phone,
                    password: password_or_prompt(password)?,
                };
                login::submit(ctx, &form).await
            }
            Self::Register {
                name,
                phone,
                email,
                password,
            } => {
                let form = RegisterForm {
                    name,
                    phone,
                    email,
                    password: password_or_prompt(password)?,
                };
                register::submit(ctx, &form).await
            }
            Self::Logout => {
                ctx.logout()?;
                View::page(String::new()).with_notice(Notice::success("Signed out"))
            }
            Self::Settings => settings::show(ctx, format).await,
            Self::Status => settings::status(ctx, format).await,
        };
        Ok(view)
    }
}
