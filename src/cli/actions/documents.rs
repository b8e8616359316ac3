use crate::{
    components::table::OutputFormat,
    features::auth::state::SessionContext,
    routes::{claim_detail, documents, View},
};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug)]
pub enum Command {
    List,
    Upload {
        claim_id: Uuid,
        file: PathBuf,
        document_type: String,
    },
    Download {
        claim_id: Uuid,
        document_id: Uuid,
        dir: PathBuf,
    },
}

impl Command {
    pub async fn execute(self, ctx: &SessionContext, format: OutputFormat) -> View {
        match self {
            Self::List => documents::list(ctx, format).await,
            Self::Upload {
                claim_id,
                file,
                document_type,
            } => claim_detail::upload(ctx, claim_id, &file, &document_type, format).await,
            Self::Download {
                claim_id,
                document_id,
                dir,
            } => documents::download(ctx, claim_id, document_id, &dir).await,
        }
    }
}
