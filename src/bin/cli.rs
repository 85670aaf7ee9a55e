use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use kanban_authz::authz::{
    restriction_message, validate_batch_with, AssignmentConfig, AssignmentPolicy,
    DefaultAssignmentPolicy, Role, PERMISSION_TABLE,
};
use kanban_authz::errors::AppError;
use kanban_authz::models::{Member, ProjectContext};
use kanban_authz::utils::{read_json_file, to_pretty_json};

#[derive(Parser, Debug)]
#[command(author, version, about = "Task assignment authorization checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether the actor may assign a task to one target
    Check {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        target: String,
        /// JSON file with `{ "projectId", "projectTeam": [{ "id" }] }`
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// List the members the actor may pick as assignees
    Members {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        actor: String,
        /// JSON array of `{ "id", "name", "email", "role" }`
        #[arg(long)]
        members: PathBuf,
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Validate a multi-assignee selection
    Validate {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        context: Option<PathBuf>,
        targets: Vec<String>,
    },
    /// Print the restriction message for a role
    Message {
        #[arg(long)]
        role: Option<String>,
    },
    /// Print the role capability table
    Capabilities,
}

#[derive(Serialize)]
struct CheckOutput {
    allowed: bool,
    reason: Option<&'static str>,
}

#[derive(Serialize)]
struct MessageOutput {
    role: Role,
    scope: &'static str,
    message: &'static str,
}

fn main() -> ExitCode {
    load_env();
    init_tracing();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            let body = to_pretty_json(&err.to_response()).unwrap_or_else(|_| err.to_string());
            eprintln!("{body}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<String, AppError> {
    let policy = DefaultAssignmentPolicy::new(AssignmentConfig::from_env()?);
    tracing::debug!(missing_team = ?policy.config().missing_team, "assignment policy loaded");

    match command {
        Commands::Check {
            role,
            actor,
            target,
            context,
        } => {
            let role = Role::normalize(role.as_deref());
            let ctx = load_context(context.as_deref())?;
            let rejection = policy.rejection(role, &actor, &target, ctx.as_ref());

            to_pretty_json(&CheckOutput {
                allowed: rejection.is_none(),
                reason: rejection.map(|r| r.message(role)),
            })
        }
        Commands::Members {
            role,
            actor,
            members,
            context,
        } => {
            let role = Role::normalize(role.as_deref());
            let all: Vec<Member> = read_json_file(&members)?;
            let ctx = load_context(context.as_deref())?;
            let assignable = policy.assignable_members(&all, role, &actor, ctx.as_ref());

            tracing::info!(
                total = all.len(),
                assignable = assignable.len(),
                role = %role,
                "filtered members"
            );
            to_pretty_json(&assignable)
        }
        Commands::Validate {
            role,
            actor,
            context,
            targets,
        } => {
            let role = Role::normalize(role.as_deref());
            let ctx = load_context(context.as_deref())?;
            let result =
                validate_batch_with(&policy, role, &actor, targets.as_slice(), ctx.as_ref());
            to_pretty_json(&result)
        }
        Commands::Message { role } => {
            let role = Role::normalize(role.as_deref());
            to_pretty_json(&MessageOutput {
                role,
                scope: role.capabilities().assignment_scope.as_str(),
                message: restriction_message(role),
            })
        }
        Commands::Capabilities => to_pretty_json(&PERMISSION_TABLE[..]),
    }
}

fn load_context(path: Option<&Path>) -> Result<Option<ProjectContext>, AppError> {
    path.map(read_json_file).transpose()
}

fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
