use crate::{
    components::{alert::Notice, badge, table, table::OutputFormat},
    features::{
        amount,
        auth::state::SessionContext,
        claims::{
            client as claims,
            types::{ClaimForm, ClaimResponse, ClaimUpdateForm},
        },
        policies::{client as policies, types::PolicyResponse},
    },
    routes::{claim_detail, enter, failed, View},
};
use tabled::Tabled;
use uuid::Uuid;

#[derive(Tabled)]
struct ClaimListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Claim")]
    number: String,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Readiness")]
    readiness: String,
}

impl ClaimListRow {
    fn new(claim: &ClaimResponse, policies: &[PolicyResponse]) -> Self {
        let policy = policies
            .iter()
            .find(|policy| policy.id == claim.policy_id)
            .map_or_else(|| claim.policy_id.to_string(), |p| p.policy_number.clone());
        Self {
            id: claim.id.to_string(),
            number: claim.claim_number.clone(),
            policy,
            kind: claim.claim_type.to_string(),
            amount: amount::display(claim.claimed_amount),
            status: badge::status(&claim.status),
            readiness: claim
                .readiness_score
                .map_or_else(|| "-".to_string(), |score| format!("{score}%")),
        }
    }
}

/// Lists claims, optionally filtered by status, with their policy numbers.
pub async fn list(ctx: &SessionContext, status: Option<&str>, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let client = ctx.client();
    let (claims, policies) = match tokio::try_join!(
        claims::list_claims(client, status),
        policies::list_policies(client)
    ) {
        Ok(lists) => lists,
        Err(err) => {
            return failed(format!(
                "Failed to load claims and policies: {}",
                err.user_message()
            ))
        }
    };

    match format {
        OutputFormat::Json => match table::json(&claims) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => {
            let rows: Vec<ClaimListRow> = claims
                .iter()
                .map(|claim| ClaimListRow::new(claim, &policies))
                .collect();
            View::page(table::table(&rows, "No claims found."))
        }
    }
}

pub async fn create(ctx: &SessionContext, form: ClaimForm, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let request = match form.into_request() {
        Ok(request) => request,
        Err(err) => return failed(err.user_message()),
    };

    match claims::create_claim(ctx.client(), &request).await {
        Ok(claim) => claim_detail::render_claim(&claim, None, format)
            .with_notice(Notice::success("Claim created successfully")),
        Err(err) => failed(err.user_message()),
    }
}

pub async fn update(
    ctx: &SessionContext,
    claim_id: Uuid,
    form: ClaimUpdateForm,
    format: OutputFormat,
) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let request = match form.into_request() {
        Ok(request) => request,
        Err(err) => return failed(err.user_message()),
    };

    match claims::update_claim(ctx.client(), claim_id, &request).await {
        Ok(claim) => claim_detail::render_claim(&claim, None, format)
            .with_notice(Notice::success("Claim updated successfully")),
        Err(err) => failed(err.user_message()),
    }
}
