//! Claim detail page and the actions available on it: submit, summary PDF and
//! document upload.

use crate::{
    api::AppError,
    components::{alert::Notice, badge, table, table::OutputFormat},
    features::{
        amount,
        auth::state::SessionContext,
        claims::{client as claims, types::ClaimResponse},
        documents::{client as documents, types::DocumentResponse},
        policies::{client as policies, types::PolicyResponse},
        timeline::{get_timeline, TimelineEvent},
        workflow::{self, SubmitClaimResponse},
    },
    routes::{documents::DocumentRow, enter, failed, timeline::render_events, Route, View},
};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;
use tracing::warn;
use uuid::Uuid;

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

fn claim_pairs(claim: &ClaimResponse) -> Vec<(&'static str, String)> {
    vec![
        ("Claim number", claim.claim_number.clone()),
        ("Type", claim.claim_type.to_string()),
        ("Status", badge::status(&claim.status)),
        ("Incident date", claim.incident_date.clone()),
        ("Location", optional(claim.incident_location.as_deref())),
        ("Description", optional(claim.incident_description.as_deref())),
        ("Claimed amount", amount::display(claim.claimed_amount)),
        ("Approved amount", optional(claim.approved_amount.map(amount::display))),
        ("Readiness score", optional(claim.readiness_score)),
        ("Fraud score", optional(claim.fraud_score)),
        ("Decision", optional(claim.decision_type.as_deref())),
        ("Rejection reason", optional(claim.rejection_reason.as_deref())),
    ]
}

/// Renders a single claim, with its policy when known.
pub(crate) fn render_claim(
    claim: &ClaimResponse,
    policy: Option<&PolicyResponse>,
    format: OutputFormat,
) -> View {
    if format == OutputFormat::Json {
        return match table::json(claim) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        };
    }

    let mut pairs = claim_pairs(claim);
    if let Some(policy) = policy {
        pairs.insert(
            1,
            (
                "Policy",
                format!("{} ({})", policy.policy_number, policy.insurer_name),
            ),
        );
    }
    View::page(table::details(&pairs))
}

#[derive(Serialize)]
struct ClaimDetailJson<'a> {
    claim: &'a ClaimResponse,
    policy: &'a PolicyResponse,
    documents: &'a [DocumentResponse],
    timeline: &'a [TimelineEvent],
}

/// Claim, policy, documents and timeline. Failing to load the claim or its
/// policy sends the user back to the claims list.
pub async fn show(ctx: &SessionContext, claim_id: Uuid, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let client = ctx.client();
    let loaded = async {
        let claim = claims::get_claim(client, claim_id).await?;
        let policy = policies::get_policy(client, claim.policy_id).await?;
        Ok::<_, AppError>((claim, policy))
    }
    .await;
    let (claim, policy) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => {
            ctx.navigator().navigate(Route::Claims);
            return failed(format!(
                "Failed to load claim details: {}",
                err.user_message()
            ));
        }
    };

    let extras = async {
        let documents = documents::list_documents(client, claim_id).await?;
        let timeline = get_timeline(client, claim_id).await?;
        Ok::<_, AppError>((documents, timeline))
    }
    .await;
    let (documents, timeline, notice) = match extras {
        Ok((documents, timeline)) => (documents, timeline, None),
        Err(err) => {
            warn!("claim extras unavailable: {err}");
            (
                Vec::new(),
                Vec::new(),
                Some(Notice::warning(format!(
                    "Failed to load documents and timeline: {}",
                    err.user_message()
                ))),
            )
        }
    };

    let view = match format {
        OutputFormat::Json => match table::json(&ClaimDetailJson {
            claim: &claim,
            policy: &policy,
            documents: &documents,
            timeline: &timeline,
        }) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => {
            let View::Page { body, .. } = render_claim(&claim, Some(&policy), format) else {
                return failed("Failed to render claim");
            };
            let rows: Vec<DocumentRow> = documents.iter().map(DocumentRow::from).collect();
            View::page(format!(
                "{body}\n\nDocuments\n{}\n\nTimeline\n{}",
                table::table(&rows, "No documents uploaded yet."),
                render_events(&timeline)
            ))
        }
    };

    match notice {
        Some(notice) => view.with_notice(notice),
        None => view,
    }
}

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "Signal")]
    kind: String,
    #[tabled(rename = "Score")]
    score: i64,
    #[tabled(rename = "Message")]
    message: String,
}

fn render_submission(response: &SubmitClaimResponse, format: OutputFormat) -> View {
    if format == OutputFormat::Json {
        return match table::json(response) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        };
    }

    let summary = table::details(&[
        ("Claim number", response.claim_number.clone()),
        ("Status", badge::status(&response.status)),
        ("Readiness score", optional(response.readiness_score)),
        ("Fraud score", optional(response.fraud_score)),
        ("Decision", optional(response.decision_type.as_deref())),
        ("Rejection reason", optional(response.rejection_reason.as_deref())),
    ]);
    let rows: Vec<SignalRow> = response
        .signals
        .iter()
        .map(|signal| SignalRow {
            kind: signal.kind.clone(),
            score: signal.score,
            message: signal.message.clone(),
        })
        .collect();
    View::page(format!(
        "{summary}\n\nSignals\n{}",
        table::table(&rows, "No signals raised.")
    ))
}

/// Submits the claim for processing; only drafts are accepted.
pub async fn submit(ctx: &SessionContext, claim_id: Uuid, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let client = ctx.client();
    let claim = match claims::get_claim(client, claim_id).await {
        Ok(claim) => claim,
        Err(err) => return failed(format!("Failed to load claim: {}", err.user_message())),
    };
    if !claim.is_draft() {
        return failed(format!(
            "Only draft claims can be submitted (current status: {})",
            claim.status
        ));
    }

    match workflow::submit_claim(client, claim_id).await {
        Ok(response) => render_submission(&response, format)
            .with_notice(Notice::success("Claim submitted successfully")),
        Err(err) => failed(format!("Failed to submit claim: {}", err.user_message())),
    }
}

/// Saves the server-rendered summary PDF as `claim-<id>-summary.pdf` in `dir`.
pub async fn download_pdf(ctx: &SessionContext, claim_id: Uuid, dir: &Path) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let client = ctx.client();
    let claim = match claims::get_claim(client, claim_id).await {
        Ok(claim) => claim,
        Err(err) => return failed(format!("Failed to load claim: {}", err.user_message())),
    };
    if !claim.has_summary_pdf() {
        return failed(format!(
            "Summary PDF is not available yet (current status: {})",
            claim.status
        ));
    }

    let bytes = match workflow::summary_pdf(client, claim_id).await {
        Ok(bytes) => bytes,
        Err(err) => return failed(format!("Failed to download PDF: {}", err.user_message())),
    };

    let target = dir.join(workflow::summary_pdf_name(claim_id));
    match tokio::fs::write(&target, &bytes).await {
        Ok(()) => View::page(target.display().to_string())
            .with_notice(Notice::success("PDF downloaded successfully")),
        Err(err) => failed(format!(
            "Failed to download PDF: cannot write {}: {err}",
            target.display()
        )),
    }
}

/// Uploads a local file to the claim.
pub async fn upload(
    ctx: &SessionContext,
    claim_id: Uuid,
    file: &Path,
    document_type: &str,
    format: OutputFormat,
) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let contents = match tokio::fs::read(file).await {
        Ok(contents) => contents,
        Err(err) => {
            return failed(format!(
                "Failed to upload document: cannot read {}: {err}",
                file.display()
            ))
        }
    };
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document");

    match documents::upload_document(ctx.client(), claim_id, file_name, contents, document_type)
        .await
    {
        Ok(document) => {
            let body = match format {
                OutputFormat::Json => match table::json(&document) {
                    Ok(body) => body,
                    Err(err) => return failed(err.user_message()),
                },
                OutputFormat::Table => table::table(&[DocumentRow::from(&document)], ""),
            };
            View::page(body).with_notice(Notice::success("Document uploaded successfully"))
        }
        Err(err) => failed(format!("Failed to upload document: {}", err.user_message())),
    }
}
