//! Maps parsed command-line arguments to an [`Action`].

use crate::{
    cli::{
        actions::{claims, documents, policies, session, Action},
        commands::{auth as auth_args, resources as args},
    },
    features::{claims::types::{ClaimForm, ClaimUpdateForm}, policies::types::PolicyLinkForm},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;
use uuid::Uuid;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).with_context(|| format!("missing required argument: --{id}"))
}

fn uuid(matches: &ArgMatches, id: &str) -> Result<Uuid> {
    matches
        .get_one::<Uuid>(id)
        .copied()
        .with_context(|| format!("missing required argument: <{id}>"))
}

fn dir(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>(args::ARG_DIR)
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

fn password(matches: &ArgMatches) -> Option<SecretString> {
    string(matches, auth_args::ARG_PASSWORD).map(SecretString::from)
}

fn policy_form(matches: &ArgMatches) -> Result<PolicyLinkForm> {
    Ok(PolicyLinkForm {
        policy_number: required(matches, args::ARG_POLICY_NUMBER)?,
        policy_type: required(matches, args::ARG_POLICY_TYPE)?,
        insurer_name: required(matches, args::ARG_INSURER)?,
        sum_insured: required(matches, args::ARG_SUM_INSURED)?,
        premium_amount: string(matches, args::ARG_PREMIUM),
        start_date: required(matches, args::ARG_START_DATE)?,
        end_date: required(matches, args::ARG_END_DATE)?,
        coverage_details: string(matches, args::ARG_COVERAGE),
    })
}

fn policies_command(matches: &ArgMatches) -> Result<policies::Command> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(policies::Command::List),
        Some(("show", sub)) => Ok(policies::Command::Show(uuid(sub, args::ARG_ID)?)),
        Some(("link", sub)) => Ok(policies::Command::Link(policy_form(sub)?)),
        Some(("create", sub)) => Ok(policies::Command::Create(policy_form(sub)?)),
        _ => Err(anyhow!("unknown policies subcommand")),
    }
}

fn claims_command(matches: &ArgMatches) -> Result<claims::Command> {
    match matches.subcommand() {
        Some(("list", sub)) => Ok(claims::Command::List {
            status: string(sub, args::ARG_STATUS),
        }),
        Some(("show", sub)) => Ok(claims::Command::Show(uuid(sub, args::ARG_ID)?)),
        Some(("create", sub)) => Ok(claims::Command::Create(ClaimForm {
            policy_id: required(sub, args::ARG_POLICY)?,
            claim_type: required(sub, args::ARG_CLAIM_TYPE)?,
            incident_date: required(sub, args::ARG_INCIDENT_DATE)?,
            incident_location: string(sub, args::ARG_LOCATION),
            incident_description: string(sub, args::ARG_DESCRIPTION),
            claimed_amount: required(sub, args::ARG_AMOUNT)?,
        })),
        Some(("update", sub)) => Ok(claims::Command::Update {
            id: uuid(sub, args::ARG_ID)?,
            form: ClaimUpdateForm {
                incident_date: string(sub, args::ARG_INCIDENT_DATE),
                incident_location: string(sub, args::ARG_LOCATION),
                incident_description: string(sub, args::ARG_DESCRIPTION),
                claimed_amount: string(sub, args::ARG_AMOUNT),
            },
        }),
        Some(("submit", sub)) => Ok(claims::Command::Submit(uuid(sub, args::ARG_ID)?)),
        Some(("pdf", sub)) => Ok(claims::Command::Pdf {
            id: uuid(sub, args::ARG_ID)?,
            dir: dir(sub),
        }),
        _ => Err(anyhow!("unknown claims subcommand")),
    }
}

fn documents_command(matches: &ArgMatches) -> Result<documents::Command> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(documents::Command::List),
        Some(("upload", sub)) => Ok(documents::Command::Upload {
            claim_id: uuid(sub, args::ARG_CLAIM_ID)?,
            file: sub
                .get_one::<PathBuf>(args::ARG_FILE)
                .cloned()
                .context("missing required argument: <file>")?,
            document_type: required(sub, args::ARG_DOCUMENT_TYPE)?,
        }),
        Some(("download", sub)) => Ok(documents::Command::Download {
            claim_id: uuid(sub, args::ARG_CLAIM_ID)?,
            document_id: uuid(sub, args::ARG_DOCUMENT_ID)?,
            dir: dir(sub),
        }),
        _ => Err(anyhow!("unknown documents subcommand")),
    }
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", sub)) => Ok(Action::Session(session::Command::Login {
            phone: required(sub, auth_args::ARG_PHONE)?,
            password: password(sub),
        })),
        Some(("register", sub)) => Ok(Action::Session(session::Command::Register {
            name: required(sub, auth_args::ARG_NAME)?,
            phone: required(sub, auth_args::ARG_PHONE)?,
            email: string(sub, auth_args::ARG_EMAIL),
            password: password(sub),
        })),
        Some(("logout", _)) => Ok(Action::Session(session::Command::Logout)),
        Some(("settings", _)) => Ok(Action::Session(session::Command::Settings)),
        Some(("status", _)) => Ok(Action::Session(session::Command::Status)),
        Some(("overview", _)) => Ok(Action::Overview),
        Some(("policies", sub)) => Ok(Action::Policies(policies_command(sub)?)),
        Some(("claims", sub)) => Ok(Action::Claims(claims_command(sub)?)),
        Some(("documents", sub)) => Ok(Action::Documents(documents_command(sub)?)),
        Some(("timeline", sub)) => Ok(Action::Timeline {
            claim_id: uuid(sub, args::ARG_CLAIM_ID)?,
        }),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}
