use crate::{
    components::{alert::Notice, badge, table, table::OutputFormat},
    features::{
        amount,
        auth::state::SessionContext,
        policies::{
            client,
            types::{PolicyLinkForm, PolicyResponse},
        },
    },
    routes::{enter, failed, View},
};
use tabled::Tabled;
use uuid::Uuid;

#[derive(Tabled)]
struct PolicyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Policy")]
    number: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Insurer")]
    insurer: String,
    #[tabled(rename = "Sum insured")]
    sum_insured: String,
    #[tabled(rename = "Valid")]
    validity: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&PolicyResponse> for PolicyRow {
    fn from(policy: &PolicyResponse) -> Self {
        Self {
            id: policy.id.to_string(),
            number: policy.policy_number.clone(),
            kind: policy.policy_type.to_string(),
            insurer: policy.insurer_name.clone(),
            sum_insured: amount::display(policy.sum_insured),
            validity: format!("{} to {}", policy.start_date, policy.end_date),
            status: badge::status(&policy.status),
        }
    }
}

fn render_details(policy: &PolicyResponse, format: OutputFormat) -> View {
    if format == OutputFormat::Json {
        return match table::json(policy) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        };
    }

    let mut pairs = vec![
        ("Policy number", policy.policy_number.clone()),
        ("Type", policy.policy_type.to_string()),
        ("Insurer", policy.insurer_name.clone()),
        ("Sum insured", amount::display(policy.sum_insured)),
        (
            "Premium",
            policy
                .premium_amount
                .map_or_else(|| "-".to_string(), amount::display),
        ),
        ("Start date", policy.start_date.to_string()),
        ("End date", policy.end_date.to_string()),
        ("Status", badge::status(&policy.status)),
    ];
    if let Some(coverage) = &policy.coverage_details {
        let rendered = serde_json::to_string_pretty(coverage).unwrap_or_default();
        pairs.push(("Coverage", rendered));
    }
    View::page(table::details(&pairs))
}

pub async fn list(ctx: &SessionContext, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let policies = match client::list_policies(ctx.client()).await {
        Ok(policies) => policies,
        Err(err) => return failed(format!("Failed to load policies: {}", err.user_message())),
    };

    match format {
        OutputFormat::Json => match table::json(&policies) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => {
            let rows: Vec<PolicyRow> = policies.iter().map(PolicyRow::from).collect();
            View::page(table::table(&rows, "No policies linked yet."))
        }
    }
}

pub async fn show(ctx: &SessionContext, policy_id: Uuid, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    match client::get_policy(ctx.client(), policy_id).await {
        Ok(policy) => render_details(&policy, format),
        Err(err) => failed(format!("Failed to load policy: {}", err.user_message())),
    }
}

/// Validates the link form and links the policy to the signed-in user.
pub async fn link(ctx: &SessionContext, form: PolicyLinkForm, format: OutputFormat) -> View {
    submit(ctx, form, format, Submission::Link).await
}

/// Validates the form and creates the policy record directly.
pub async fn create(ctx: &SessionContext, form: PolicyLinkForm, format: OutputFormat) -> View {
    submit(ctx, form, format, Submission::Create).await
}

#[derive(Clone, Copy)]
enum Submission {
    Link,
    Create,
}

async fn submit(
    ctx: &SessionContext,
    form: PolicyLinkForm,
    format: OutputFormat,
    submission: Submission,
) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let request = match form.into_request() {
        Ok(request) => request,
        Err(err) => return failed(err.user_message()),
    };

    let (result, verb, done) = match submission {
        Submission::Link => (
            client::link_policy(ctx.client(), &request).await,
            "link",
            "linked",
        ),
        Submission::Create => (
            client::create_policy(ctx.client(), &request).await,
            "create",
            "created",
        ),
    };

    match result {
        Ok(policy) => render_details(&policy, format)
            .with_notice(Notice::success(format!("Policy {done} successfully"))),
        Err(err) => failed(format!("Failed to {verb} policy: {}", err.user_message())),
    }
}
