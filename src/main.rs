use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use questlog::CatalogKind;

mod cli;

use cli::Options;
use cli::records::EditArgs;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Earn points for activities, spend them on rewards, climb the ranks")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.questlog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the CSV data files (overrides the config)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// User to act as (defaults to the config's default user, then the first user)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu
    Menu,

    /// Create the config file and starter data files
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Show points and rank of the active user
    Status {
        #[arg(long)]
        json: bool,
    },

    /// List activities grouped into daily and miscellaneous
    Activities {
        #[arg(long)]
        json: bool,
    },

    /// List rewards grouped into regular and long-term
    Rewards {
        #[arg(long)]
        json: bool,
    },

    /// Show every rank and whether it is achieved
    Achievements {
        #[arg(long)]
        json: bool,
    },

    /// Complete an activity and earn its points
    Complete { name: String },

    /// Spend points on a reward
    Redeem { name: String },

    /// Add a new activity
    AddActivity {
        name: String,
        points: String,
        /// Daily task? (yes/no)
        #[arg(default_value = "no")]
        daily: String,
    },

    /// Add a new reward
    AddReward {
        name: String,
        price: String,
        /// Regular reward? (yes/no)
        #[arg(default_value = "no")]
        regular: String,
    },

    /// Change an activity's name, points or daily flag
    EditActivity {
        name: String,
        #[arg(long = "name", value_name = "NEW_NAME")]
        new_name: Option<String>,
        #[arg(long)]
        points: Option<String>,
        #[arg(long)]
        daily: Option<String>,
    },

    /// Change a reward's name, price or regular flag
    EditReward {
        name: String,
        #[arg(long = "name", value_name = "NEW_NAME")]
        new_name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        regular: Option<String>,
    },

    /// Delete an activity
    DeleteActivity { name: String },

    /// Delete a reward
    DeleteReward { name: String },

    /// List users
    Users,

    /// Add a user with zero points
    AddUser { name: String },

    /// Delete a user (the last one cannot be deleted)
    DeleteUser { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with menu output
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Options {
        config: cli.config,
        data_dir: cli.data_dir,
        user: cli.user,
    };

    match cli.command {
        Some(Commands::Menu) | None => cli::menu::menu_command(&opts)?,
        Some(Commands::Init { force }) => cli::init::init_command(&opts, force)?,
        Some(Commands::Status { json }) => cli::status::status_command(&opts, json)?,
        Some(Commands::Activities { json }) => {
            cli::records::list_command(&opts, CatalogKind::Activities, json)?;
        }
        Some(Commands::Rewards { json }) => {
            cli::records::list_command(&opts, CatalogKind::Rewards, json)?;
        }
        Some(Commands::Achievements { json }) => {
            cli::status::achievements_command(&opts, json)?;
        }
        Some(Commands::Complete { name }) => cli::records::complete_command(&opts, &name)?,
        Some(Commands::Redeem { name }) => cli::records::redeem_command(&opts, &name)?,
        Some(Commands::AddActivity {
            name,
            points,
            daily,
        }) => cli::records::add_activity_command(&opts, &name, &points, &daily)?,
        Some(Commands::AddReward {
            name,
            price,
            regular,
        }) => cli::records::add_reward_command(&opts, &name, &price, &regular)?,
        Some(Commands::EditActivity {
            name,
            new_name,
            points,
            daily,
        }) => {
            let edits = EditArgs {
                name: new_name,
                value: points,
                flag: daily,
            };
            cli::records::edit_command(&opts, CatalogKind::Activities, &name, &edits)?;
        }
        Some(Commands::EditReward {
            name,
            new_name,
            price,
            regular,
        }) => {
            let edits = EditArgs {
                name: new_name,
                value: price,
                flag: regular,
            };
            cli::records::edit_command(&opts, CatalogKind::Rewards, &name, &edits)?;
        }
        Some(Commands::DeleteActivity { name }) => {
            cli::records::delete_command(&opts, CatalogKind::Activities, &name)?;
        }
        Some(Commands::DeleteReward { name }) => {
            cli::records::delete_command(&opts, CatalogKind::Rewards, &name)?;
        }
        Some(Commands::Users) => cli::users::users_command(&opts)?,
        Some(Commands::AddUser { name }) => cli::users::add_user_command(&opts, &name)?,
        Some(Commands::DeleteUser { name }) => cli::users::delete_user_command(&opts, &name)?,
    }

    Ok(())
}
