//! Overview page: headline counts and the most recent claims.

use crate::{
    components::{badge, table, table::OutputFormat},
    features::{
        amount,
        auth::state::SessionContext,
        claims::{client as claims, types::ClaimResponse},
        policies::{client as policies, types::PolicyResponse},
    },
    routes::{enter, failed, View},
};
use serde::Serialize;
use tabled::Tabled;

pub const RECENT_CLAIMS: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_policies: usize,
    pub active_policies: usize,
    pub total_claims: usize,
    pub pending_reviews: usize,
}

#[must_use]
pub fn stats(policies: &[PolicyResponse], claims: &[ClaimResponse]) -> OverviewStats {
    OverviewStats {
        total_policies: policies.len(),
        active_policies: policies.iter().filter(|policy| policy.is_active()).count(),
        total_claims: claims.len(),
        pending_reviews: claims.iter().filter(|claim| claim.is_pending()).count(),
    }
}

/// Newest claims first, at most `limit`.
#[must_use]
pub fn recent_claims(claims: &[ClaimResponse], limit: usize) -> Vec<&ClaimResponse> {
    let mut recent: Vec<&ClaimResponse> = claims.iter().collect();
    recent.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
    recent.truncate(limit);
    recent
}

#[derive(Tabled)]
pub(crate) struct ClaimRow {
    #[tabled(rename = "Claim")]
    number: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Incident")]
    incident: String,
}

impl From<&ClaimResponse> for ClaimRow {
    fn from(claim: &ClaimResponse) -> Self {
        Self {
            number: claim.claim_number.clone(),
            kind: claim.claim_type.to_string(),
            amount: amount::display(claim.claimed_amount),
            status: badge::status(&claim.status),
            incident: claim.incident_date.chars().take(10).collect(),
        }
    }
}

#[derive(Serialize)]
struct OverviewJson<'a> {
    stats: OverviewStats,
    recent_claims: Vec<&'a ClaimResponse>,
}

pub async fn overview(ctx: &SessionContext, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let client = ctx.client();
    let (policies, claims) = match tokio::try_join!(
        policies::list_policies(client),
        claims::list_claims(client, None)
    ) {
        Ok(lists) => lists,
        Err(err) => {
            return failed(format!(
                "Failed to load dashboard data: {}",
                err.user_message()
            ))
        }
    };

    let stats = stats(&policies, &claims);
    let recent = recent_claims(&claims, RECENT_CLAIMS);

    match format {
        OutputFormat::Json => match table::json(&OverviewJson {
            stats,
            recent_claims: recent,
        }) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => {
            let summary = table::details(&[
                ("Total policies", stats.total_policies.to_string()),
                ("Active policies", stats.active_policies.to_string()),
                ("Total claims", stats.total_claims.to_string()),
                ("Pending reviews", stats.pending_reviews.to_string()),
            ]);
            let rows: Vec<ClaimRow> = recent.into_iter().map(ClaimRow::from).collect();
            View::page(format!(
                "{summary}\n\nRecent claims\n{}",
                table::table(&rows, "No claims yet.")
            ))
        }
    }
}
