//! Dashboard subcommands: overview, policies, claims, documents and timeline.

use clap::{Arg, Command};
use std::path::PathBuf;
use uuid::Uuid;

pub const ARG_ID: &str = "id";
pub const ARG_CLAIM_ID: &str = "claim-id";
pub const ARG_DOCUMENT_ID: &str = "document-id";
pub const ARG_STATUS: &str = "status";
pub const ARG_DIR: &str = "dir";
pub const ARG_FILE: &str = "file";
pub const ARG_DOCUMENT_TYPE: &str = "type";

pub const ARG_POLICY_NUMBER: &str = "number";
pub const ARG_POLICY_TYPE: &str = "type";
pub const ARG_INSURER: &str = "insurer";
pub const ARG_SUM_INSURED: &str = "sum-insured";
pub const ARG_PREMIUM: &str = "premium";
pub const ARG_START_DATE: &str = "start-date";
pub const ARG_END_DATE: &str = "end-date";
pub const ARG_COVERAGE: &str = "coverage";

pub const ARG_POLICY: &str = "policy";
pub const ARG_CLAIM_TYPE: &str = "type";
pub const ARG_INCIDENT_DATE: &str = "incident-date";
pub const ARG_LOCATION: &str = "location";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_AMOUNT: &str = "amount";

fn uuid_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(Uuid))
}

fn dir_arg() -> Arg {
    Arg::new(ARG_DIR)
        .long(ARG_DIR)
        .help("Directory to save into")
        .default_value(".")
        .value_parser(clap::value_parser!(PathBuf))
}

fn kind_arg(help: &'static str) -> Arg {
    Arg::new(ARG_POLICY_TYPE)
        .long("type")
        .help(help)
        .value_parser(["health", "motor"])
        .required(true)
}

fn policy_form_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_POLICY_NUMBER)
                .long(ARG_POLICY_NUMBER)
                .help("Insurer policy number")
                .required(true),
        )
        .arg(kind_arg("Policy type"))
        .arg(
            Arg::new(ARG_INSURER)
                .long(ARG_INSURER)
                .help("Insurer name")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SUM_INSURED)
                .long(ARG_SUM_INSURED)
                .help("Sum insured, e.g. 500000")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PREMIUM)
                .long(ARG_PREMIUM)
                .help("Premium amount"),
        )
        .arg(
            Arg::new(ARG_START_DATE)
                .long(ARG_START_DATE)
                .help("Start date (YYYY-MM-DD)")
                .required(true),
        )
        .arg(
            Arg::new(ARG_END_DATE)
                .long(ARG_END_DATE)
                .help("End date (YYYY-MM-DD)")
                .required(true),
        )
        .arg(
            Arg::new(ARG_COVERAGE)
                .long(ARG_COVERAGE)
                .help("Coverage details as a JSON object"),
        )
}

fn claim_edit_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_LOCATION)
                .long(ARG_LOCATION)
                .help("Where the incident happened"),
        )
        .arg(
            Arg::new(ARG_DESCRIPTION)
                .long(ARG_DESCRIPTION)
                .help("What happened"),
        )
}

fn policies() -> Command {
    Command::new("policies")
        .about("List, inspect and link insurance policies")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List linked policies"))
        .subcommand(
            Command::new("show")
                .about("Show one policy")
                .arg(uuid_arg(ARG_ID, "Policy ID")),
        )
        .subcommand(policy_form_args(
            Command::new("link").about("Link an existing insurer policy"),
        ))
        .subcommand(policy_form_args(
            Command::new("create").about("Create a policy record"),
        ))
}

fn claims() -> Command {
    Command::new("claims")
        .about("File and track claims")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list").about("List claims").arg(
                Arg::new(ARG_STATUS)
                    .long(ARG_STATUS)
                    .help("Only claims with this status"),
            ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a claim with its documents and timeline")
                .arg(uuid_arg(ARG_ID, "Claim ID")),
        )
        .subcommand(claim_edit_args(
            Command::new("create")
                .about("File a new claim")
                .arg(
                    Arg::new(ARG_POLICY)
                        .long(ARG_POLICY)
                        .help("Policy ID the claim is filed against")
                        .required(true),
                )
                .arg(kind_arg("Claim type"))
                .arg(
                    Arg::new(ARG_INCIDENT_DATE)
                        .long(ARG_INCIDENT_DATE)
                        .help("Incident date (YYYY-MM-DD or RFC 3339)")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_AMOUNT)
                        .long(ARG_AMOUNT)
                        .help("Claimed amount")
                        .required(true),
                ),
        ))
        .subcommand(claim_edit_args(
            Command::new("update")
                .about("Edit a claim")
                .arg(uuid_arg(ARG_ID, "Claim ID"))
                .arg(
                    Arg::new(ARG_INCIDENT_DATE)
                        .long(ARG_INCIDENT_DATE)
                        .help("Incident date (YYYY-MM-DD or RFC 3339)"),
                )
                .arg(
                    Arg::new(ARG_AMOUNT)
                        .long(ARG_AMOUNT)
                        .help("Claimed amount"),
                ),
        ))
        .subcommand(
            Command::new("submit")
                .about("Submit a draft claim for processing")
                .arg(uuid_arg(ARG_ID, "Claim ID")),
        )
        .subcommand(
            Command::new("pdf")
                .about("Download the claim summary PDF")
                .arg(uuid_arg(ARG_ID, "Claim ID"))
                .arg(dir_arg()),
        )
}

fn documents() -> Command {
    Command::new("documents")
        .about("Claim documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List documents across all claims"))
        .subcommand(
            Command::new("upload")
                .about("Upload a file to a claim")
                .arg(uuid_arg(ARG_CLAIM_ID, "Claim ID"))
                .arg(
                    Arg::new(ARG_FILE)
                        .help("File to upload (PDF, JPG or PNG)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new(ARG_DOCUMENT_TYPE)
                        .long("type")
                        .help("Document type, e.g. \"Medical Report\"")
                        .default_value("Medical Report"),
                ),
        )
        .subcommand(
            Command::new("download")
                .about("Download a stored document")
                .arg(uuid_arg(ARG_CLAIM_ID, "Claim ID"))
                .arg(uuid_arg(ARG_DOCUMENT_ID, "Document ID"))
                .arg(dir_arg()),
        )
}

#[must_use]
pub fn subcommands(command: Command) -> Command {
    command
        .subcommand(Command::new("overview").about("Dashboard overview"))
        .subcommand(policies())
        .subcommand(claims())
        .subcommand(documents())
        .subcommand(
            Command::new("timeline")
                .about("Show the timeline of a claim")
                .arg(uuid_arg(ARG_CLAIM_ID, "Claim ID")),
        )
}
