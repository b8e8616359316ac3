use crate::{
    components::table::OutputFormat,
    features::{
        auth::state::SessionContext,
        claims::types::{ClaimForm, ClaimUpdateForm},
    },
    routes::{claim_detail, claims, View},
};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug)]
pub enum Command {
    List { status: Option<String> },
    Show(Uuid),
    Create(ClaimForm),
    Update { id: Uuid, form: ClaimUpdateForm },
    Submit(Uuid),
    Pdf { id: Uuid, dir: PathBuf },
}

impl Command {
    pub async fn execute(self, ctx: &SessionContext, format: OutputFormat) -> View {
        match self {
            Self::List { status } => claims::list(ctx, status.as_deref(), format).await,
            Self::Show(id) => claim_detail::show(ctx, id, format).await,
            Self::Create(form) => claims::create(ctx, form, format).await,
            Self::Update { id, form } => claims::update(ctx, id, form, format).await,
            Self::Submit(id) => claim_detail::submit(ctx, id, format).await,
            Self::Pdf { id, dir } => claim_detail::download_pdf(ctx, id, &dir).await,
        }
    }
}
