//! Command-line argument definitions using clap.
//!
//! Each command's arguments are a clap struct that converts into the
//! matching core parameter type with `From`, so core types stay free of
//! clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Mapper
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use waypoint_core::{
    params::{AddStep, OpenProject, SetCredentials, ShareJourney, StartJourney, Suggest},
    relay::{config::DEFAULT_RELAY_PORT, DEFAULT_RELAY_URL},
    Provider, RelayConfig,
};

/// Map user journeys step by step with model-generated suggestions
///
/// Waypoint keeps one live journey: a context and a chain of steps. Each
/// change asks a language model, through the local relay, for the next
/// likely steps. Journeys can be rendered as Mermaid flowcharts, saved as
/// projects, exported and shared.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Base URL of the model relay
    #[arg(long, global = true, env = "WAYPOINT_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. With no command the live journey is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Start a new journey from a context description
    #[command(alias = "new")]
    Start(StartArgs),
    /// Append a step after the current tail
    #[command(alias = "a")]
    Add(AddArgs),
    /// Regenerate suggestions for the journey or a prefix of it
    #[command(alias = "s")]
    Suggest(SuggestArgs),
    /// Regenerate suggestions for the tail and add the numbered one as a step
    ///
    /// The list is generated again and printed before the pick, so it can
    /// differ from the one an earlier command showed. Use `wp add "<text>"`
    /// to add an exact step.
    Pick(PickArgs),
    /// Undo the last change to the journey
    Undo,
    /// Redo the last undone change
    Redo,
    /// Ask the model for a complete end-to-end journey
    Complete,
    /// Show the live journey
    Show,
    /// Print the journey as Mermaid flowchart source
    #[command(alias = "d")]
    Diagram(DiagramArgs),
    /// Empty the live journey
    Clear,
    /// Manage saved projects and templates
    #[command(alias = "p")]
    Projects {
        #[command(subcommand)]
        command: Option<ProjectCommands>,
    },
    /// Manage model credentials
    Credentials {
        #[command(subcommand)]
        command: CredentialCommands,
    },
    /// Write the journey as a JSON export document
    Export(ExportArgs),
    /// Print a link carrying the journey
    Share(ShareArgs),
    /// Load a journey from a share link or an export file
    Import(ImportArgs),
    /// Interactive session: pick suggestions, add steps, undo and redo
    #[command(alias = "i")]
    Session,
    /// Run the local model relay
    Relay(RelayArgs),
}

#[derive(ClapArgs)]
pub struct StartArgs {
    /// What is being mapped, e.g. "Online bookstore"
    #[arg(required = true, num_args = 1..)]
    pub context: Vec<String>,
}

impl From<StartArgs> for StartJourney {
    fn from(val: StartArgs) -> Self {
        StartJourney {
            context: val.context.join(" "),
        }
    }
}

#[derive(ClapArgs)]
pub struct AddArgs {
    /// Text of the new step
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl From<AddArgs> for AddStep {
    fn from(val: AddArgs) -> Self {
        AddStep {
            text: val.text.join(" "),
        }
    }
}

#[derive(ClapArgs)]
pub struct SuggestArgs {
    /// Suggest for the prefix ending at this step id instead of the tail
    #[arg(long = "step")]
    pub step_id: Option<String>,
}

impl From<SuggestArgs> for Suggest {
    fn from(val: SuggestArgs) -> Self {
        Suggest {
            step_id: val.step_id,
        }
    }
}

#[derive(ClapArgs)]
pub struct PickArgs {
    /// 1-based number from the suggestion list
    pub number: usize,
}

#[derive(ClapArgs)]
pub struct DiagramArgs {
    /// Color palette: emerald, blue, violet or indigo. Defaults to one chosen
    /// from the journey context
    #[arg(long)]
    pub palette: Option<String>,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List saved projects and templates
    #[command(aliases = ["l", "ls"])]
    List,
    /// Open a saved project or template by id
    #[command(alias = "o")]
    Open(OpenProjectArgs),
}

#[derive(ClapArgs)]
pub struct OpenProjectArgs {
    #[arg(help = "Project or template id, e.g. 'ecommerce'")]
    pub id: String,
}

impl From<OpenProjectArgs> for OpenProject {
    fn from(val: OpenProjectArgs) -> Self {
        OpenProject { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum CredentialCommands {
    /// Store API keys and choose the active provider
    Set(SetCredentialsArgs),
    /// Show the stored credentials with keys masked
    Show,
    /// Remove stored credentials
    Clear,
}

/// Vendor selection for `credentials set`
#[derive(Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    #[value(name = "openai")]
    OpenAi,
    Anthropic,
}

impl From<ProviderArg> for Provider {
    fn from(val: ProviderArg) -> Self {
        match val {
            ProviderArg::OpenAi => Provider::OpenAi,
            ProviderArg::Anthropic => Provider::Anthropic,
        }
    }
}

#[derive(ClapArgs)]
pub struct SetCredentialsArgs {
    /// Provider to use for suggestions
    #[arg(short, long, value_enum, default_value = "openai")]
    pub provider: ProviderArg,
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_key: Option<String>,
    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_key: Option<String>,
}

impl From<SetCredentialsArgs> for SetCredentials {
    fn from(val: SetCredentialsArgs) -> Self {
        SetCredentials {
            provider: val.provider.into(),
            openai_key: val.openai_key,
            anthropic_key: val.anthropic_key,
        }
    }
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct ShareArgs {
    /// Origin the link points at
    #[arg(long, default_value = "http://localhost:5173")]
    pub origin: String,
}

impl From<ShareArgs> for ShareJourney {
    fn from(val: ShareArgs) -> Self {
        ShareJourney { origin: val.origin }
    }
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    /// A share link, or the path of a JSON export file
    pub source: String,
}

#[derive(ClapArgs)]
pub struct RelayArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_RELAY_PORT)]
    pub port: u16,
    /// Upstream OpenAI chat completions endpoint
    #[arg(long)]
    pub openai_url: Option<String>,
    /// Upstream Anthropic messages endpoint
    #[arg(long)]
    pub anthropic_url: Option<String>,
}

impl From<RelayArgs> for RelayConfig {
    fn from(val: RelayArgs) -> Self {
        let defaults = RelayConfig::default();
        RelayConfig {
            host: val.host,
            port: val.port,
            openai_url: val.openai_url.unwrap_or(defaults.openai_url),
            anthropic_url: val.anthropic_url.unwrap_or(defaults.anthropic_url),
        }
    }
}
