use crate::{
    components::table::OutputFormat,
    features::{auth::state::SessionContext, policies::types::PolicyLinkForm},
    routes::{policies, View},
};
use uuid::Uuid;

#[derive(Debug)]
pub enum Command {
    List,
    Show(Uuid),
    Link(PolicyLinkForm),
    Create(PolicyLinkForm),
}

impl Command {
    pub async fn execute(self, ctx: &SessionContext, format: OutputFormat) -> View {
        match self {
            Self::List => policies::list(ctx, format).await,
            Self::Show(id) => policies::show(ctx, id, format).await,
            Self::Link(form) => policies::link(ctx, form, format).await,
            Self::Create(form) => policies::create(ctx, form, format).await,
        }
    }
}
