use anyhow::Result;
use cadence::commands::{evidence, init, list, mechanism, seed, set_status, show, status};
use cadence::models::{ActivityStatus, Role};
use cadence::rules::Rejection;
use cadence::validation::{clap_code_validator, clap_name_validator};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Program schedule tracking CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the .cadence/ data directory
    Init {
        /// Program name shown on the dashboard
        #[arg(long)]
        program: Option<String>,

        /// Project start date (YYYY-MM-DD) anchoring week indices
        #[arg(long)]
        start: Option<String>,
    },

    /// Load the built-in demo program
    Seed {
        /// Seed even if activities already exist
        #[arg(long)]
        force: bool,
    },

    /// Show the program status dashboard
    Status,

    /// List activities
    List {
        /// Only activities with this primary role
        #[arg(short, long)]
        role: Option<String>,

        /// Only activities with this status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show one activity in detail
    Show {
        /// Activity code (alphanumeric, dash, underscore, dot; max 64 characters)
        #[arg(value_parser = clap_code_validator)]
        activity_code: String,
    },

    /// Change an activity's status (dependency and evidence rules apply)
    SetStatus {
        #[arg(value_parser = clap_code_validator)]
        activity_code: String,

        /// Target status: pending, in-progress, blocked, done
        status: String,

        /// Caller role: finanzas, legal, coord, gobierno
        #[arg(long)]
        role: String,

        /// Caller name, for attribution in logs
        #[arg(long)]
        user: Option<String>,
    },

    /// Mark an activity done (shorthand for set-status ... done)
    Done {
        #[arg(value_parser = clap_code_validator)]
        activity_code: String,

        /// Caller role: finanzas, legal, coord, gobierno
        #[arg(long)]
        role: String,

        /// Caller name, for attribution in logs
        #[arg(long)]
        user: Option<String>,
    },

    /// Manage evidence files
    Evidence {
        #[command(subcommand)]
        command: EvidenceCommands,
    },

    /// Manage financing mechanisms
    Mechanism {
        #[command(subcommand)]
        command: MechanismCommands,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum EvidenceCommands {
    /// Attach a file as evidence for an activity
    Attach {
        #[arg(value_parser = clap_code_validator)]
        activity_code: String,

        /// Path to the file to attach
        file: PathBuf,

        /// Caller role: finanzas, legal, coord, gobierno
        #[arg(long)]
        role: String,

        /// Caller name, for attribution on the record
        #[arg(long)]
        user: Option<String>,
    },

    /// List evidence records, optionally for one activity
    List {
        #[arg(value_parser = clap_code_validator)]
        activity_code: Option<String>,
    },

    /// Remove an evidence record and its stored file
    Remove {
        /// Evidence record id (UUID)
        id: String,
    },

    /// Refresh every activity's cached evidence flag from the store
    Sync,
}

#[derive(Subcommand)]
enum MechanismCommands {
    /// Create a mechanism in the Draft stage
    Create {
        /// Mechanism name (max 200 characters)
        #[arg(value_parser = clap_name_validator)]
        name: String,

        /// Explicit id (defaults to a slug derived from the name)
        #[arg(long, value_parser = clap_code_validator)]
        id: Option<String>,

        /// Caller role: finanzas, legal, coord, gobierno
        #[arg(long)]
        role: String,

        /// Caller name, recorded as creator
        #[arg(long)]
        user: Option<String>,
    },

    /// List mechanisms grouped by pipeline stage
    List,

    /// Advance a mechanism one stage (role-gated)
    Advance {
        #[arg(value_parser = clap_code_validator)]
        id: String,

        /// Caller role: finanzas, legal, coord, gobierno
        #[arg(long)]
        role: String,

        /// Caller name, for attribution in logs
        #[arg(long)]
        user: Option<String>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { program, start } => init::execute(program, start),
        Commands::Seed { force } => seed::execute(force),
        Commands::Status => status::execute(),
        Commands::List { role, status } => {
            let role = role.map(|r| r.parse::<Role>()).transpose()?;
            let status = status.map(|s| s.parse::<ActivityStatus>()).transpose()?;
            list::execute(role, status)
        }
        Commands::Show { activity_code } => show::execute(activity_code),
        Commands::SetStatus {
            activity_code,
            status,
            role,
            user,
        } => {
            let target = status.parse::<ActivityStatus>()?;
            let role = role.parse::<Role>()?;
            set_status::execute(activity_code, target, role, user)
        }
        Commands::Done {
            activity_code,
            role,
            user,
        } => {
            let role = role.parse::<Role>()?;
            set_status::execute(activity_code, ActivityStatus::Done, role, user)
        }
        Commands::Evidence { command } => match command {
            EvidenceCommands::Attach {
                activity_code,
                file,
                role,
                user,
            } => {
                let role = role.parse::<Role>()?;
                evidence::attach(activity_code, file, role, user)
            }
            EvidenceCommands::List { activity_code } => evidence::list(activity_code),
            EvidenceCommands::Remove { id } => evidence::remove(id),
            EvidenceCommands::Sync => evidence::sync(),
        },
        Commands::Mechanism { command } => match command {
            MechanismCommands::Create {
                name,
                id,
                role,
                user,
            } => {
                let role = role.parse::<Role>()?;
                mechanism::create(name, id, role, user)
            }
            MechanismCommands::List => mechanism::list(),
            MechanismCommands::Advance { id, role, user } => {
                let role = role.parse::<Role>()?;
                mechanism::advance(id, role, user)
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cadence", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        // Rule rejections are expected outcomes, not program failures:
        // print the reason without the error-chain noise.
        if let Some(rejection) = error.downcast_ref::<Rejection>() {
            eprintln!("{} {rejection}", "Rejected:".red().bold());
        } else {
            eprintln!("{} {error:#}", "Error:".red().bold());
        }
        std::process::exit(1);
    }
}
