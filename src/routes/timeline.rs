use crate::{
    components::{table, table::OutputFormat},
    features::{
        auth::state::SessionContext,
        timeline::{get_timeline, TimelineEvent},
    },
    routes::{enter, failed, View},
};
use colored::Colorize;
use uuid::Uuid;

/// One line per event: timestamp, type, description.
pub(crate) fn render_events(events: &[TimelineEvent]) -> String {
    if events.is_empty() {
        return "No timeline events yet.".to_string();
    }
    events
        .iter()
        .map(|event| {
            format!(
                "{}  {}  {}",
                event.timestamp.dimmed(),
                event.event_type.replace('_', " ").bold(),
                event.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn show(ctx: &SessionContext, claim_id: Uuid, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let events = match get_timeline(ctx.client(), claim_id).await {
        Ok(events) => events,
        Err(err) => return failed(format!("Failed to load timeline: {}", err.user_message())),
    };

    match format {
        OutputFormat::Json => match table::json(&events) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => View::page(render_events(&events)),
    }
}
