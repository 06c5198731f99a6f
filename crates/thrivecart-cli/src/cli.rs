//! Command-line interface argument parsing and definitions
//!
//! The CLI mirrors the library's resource groups: one subcommand per
//! resource, with nested actions where a resource has more than one.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// ThriveCart CLI - Query and manage a ThriveCart account from the terminal
///
/// Reads products, transactions and affiliates, issues refunds and
/// subscription changes, and manages webhook event subscriptions.
#[derive(Parser, Debug)]
#[command(
    name = "thrivecart",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "THRIVECART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Account mode to operate in
    #[arg(long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Base URI override (development environments)
    #[arg(long, global = true, value_name = "URI")]
    pub base_uri: Option<String>,

    /// Access token (overrides config file and THRIVECART_ACCESS_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the API is reachable and the token is accepted
    Ping,

    /// Show the account behind the access token
    Account,

    /// List products, or show one product
    Products(CatalogArgs),

    /// List bumps, or show one bump
    Bumps(CatalogArgs),

    /// List upsells, or show one upsell
    Upsells(CatalogArgs),

    /// List downsells, or show one downsell
    Downsells(CatalogArgs),

    /// Search transactions
    Transactions(TransactionsArgs),

    /// Look up a customer by email address
    Customer(CustomerArgs),

    /// Refund an item of an order
    Refund(RefundArgs),

    /// Cancel, pause or resume a subscription
    Subscription(SubscriptionArgs),

    /// Manage affiliates
    Affiliates(AffiliatesArgs),

    /// Manage webhook event subscriptions
    Events(EventsArgs),

    /// OAuth helpers
    Oauth(OauthArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments shared by the product-like resources
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Show a single item instead of listing
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Show the item's pricing options
    #[arg(long, requires = "id")]
    pub pricing_options: bool,

    /// Only list items with this status
    #[arg(long, value_enum, conflicts_with = "id")]
    pub status: Option<ModeArg>,
}

/// Arguments for the transactions command
#[derive(Args, Debug)]
pub struct TransactionsArgs {
    /// Customer email, order ID, invoice ID and similar
    #[arg(long)]
    pub query: Option<String>,

    /// Only show transactions of this type
    #[arg(long = "type", value_enum)]
    pub transaction_type: Option<TransactionTypeArg>,

    /// Results per page (at most 25)
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

/// Arguments for the customer command
#[derive(Args, Debug)]
pub struct CustomerArgs {
    /// Customer email address
    #[arg(value_name = "EMAIL")]
    pub email: String,
}

/// Arguments for the refund command
#[derive(Args, Debug)]
pub struct RefundArgs {
    /// Order to refund
    #[arg(long)]
    pub order_id: i64,

    /// Item reference within the order, e.g. product-5
    #[arg(long)]
    pub reference: String,

    /// Internal note, never shown to the customer
    #[arg(long)]
    pub reason: Option<String>,
}

/// Arguments for the subscription command
#[derive(Args, Debug)]
pub struct SubscriptionArgs {
    #[command(subcommand)]
    pub action: SubscriptionAction,
}

/// Subscription actions
#[derive(Subcommand, Debug)]
pub enum SubscriptionAction {
    /// Cancel a subscription
    Cancel(SubscriptionIds),

    /// Pause a subscription
    Pause(PauseArgs),

    /// Resume a paused subscription
    Resume(SubscriptionIds),
}

/// Identifies one subscription within an order
#[derive(Args, Debug)]
pub struct SubscriptionIds {
    /// Order the subscription belongs to
    #[arg(long)]
    pub order_id: i64,

    /// Subscription to act on
    #[arg(long)]
    pub subscription_id: i64,
}

/// Arguments for subscription pause
#[derive(Args, Debug)]
pub struct PauseArgs {
    #[command(flatten)]
    pub ids: SubscriptionIds,

    /// Unix timestamp to resume automatically (at least a day ahead)
    #[arg(long, value_name = "TIMESTAMP")]
    pub auto_resume: Option<i64>,
}

/// Arguments for the affiliates command
#[derive(Args, Debug)]
pub struct AffiliatesArgs {
    #[command(subcommand)]
    pub action: AffiliatesAction,
}

/// Affiliate actions
#[derive(Subcommand, Debug)]
pub enum AffiliatesAction {
    /// List affiliates
    List(AffiliatesListArgs),

    /// Look up a single affiliate by ID or email address
    Lookup {
        /// Affiliate ID or email address
        #[arg(value_name = "AFFILIATE")]
        affiliate_id: String,
    },

    /// Create an affiliate from a JSON object
    Create {
        /// Affiliate fields as a JSON object
        #[arg(long, value_name = "JSON")]
        data: String,
    },

    /// Run an action against a single affiliate
    Action {
        /// Action to perform
        #[arg(value_enum)]
        action: AffiliateActionArg,

        /// Affiliate ID
        #[arg(value_name = "AFFILIATE_ID")]
        affiliate_id: String,

        /// Extra fields as a JSON object
        #[arg(long, value_name = "JSON")]
        data: Option<String>,
    },
}

/// Arguments for affiliates list
#[derive(Args, Debug)]
pub struct AffiliatesListArgs {
    /// Only affiliates promoting this product
    #[arg(long)]
    pub product_id: Option<i64>,

    /// Affiliate name, email or affiliate ID
    #[arg(long)]
    pub query: Option<String>,

    /// Results per page (at most 25)
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,
}

/// Arguments for the events command
#[derive(Args, Debug)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Event subscription actions
#[derive(Subcommand, Debug)]
pub enum EventsAction {
    /// Subscribe a URL to an event
    Subscribe {
        /// Event name, or * for every event
        #[arg(value_name = "EVENT")]
        event: String,

        /// URL that receives the webhook
        #[arg(value_name = "TARGET_URL")]
        target_url: String,

        /// Only fire when KEY matches VALUE (repeatable)
        #[arg(long = "trigger-field", value_name = "KEY=VALUE")]
        trigger_fields: Vec<String>,
    },

    /// Remove every subscription for a URL
    Unsubscribe {
        /// URL to unsubscribe
        #[arg(value_name = "TARGET_URL")]
        target_url: String,
    },
}

/// Arguments for the oauth command
#[derive(Args, Debug)]
pub struct OauthArgs {
    #[command(subcommand)]
    pub action: OauthAction,
}

/// OAuth actions
#[derive(Subcommand, Debug)]
pub enum OauthAction {
    /// Print the URL a merchant visits to authorize an application
    AuthorizeUrl(AuthorizeUrlArgs),

    /// Show the account that owns the access token
    Me,
}

/// Arguments for oauth authorize-url
#[derive(Args, Debug)]
pub struct AuthorizeUrlArgs {
    /// Opaque value echoed back to the redirect URI
    #[arg(long)]
    pub state: String,

    /// Scope to request (repeatable)
    #[arg(long = "scope", value_name = "SCOPE")]
    pub scopes: Vec<String>,

    /// OAuth client ID (overrides config)
    #[arg(long, env = "THRIVECART_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Redirect URI registered for the application (overrides config)
    #[arg(long)]
    pub redirect_uri: Option<String>,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration with secrets redacted
    Show(ConfigShowArgs),

    /// Write a default configuration file
    Init(ConfigInitArgs),
}

/// Arguments for config show
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Arguments for config init
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
    /// TOML format
    Toml,
}

/// Arguments for generating shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Account mode
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Live account data
    Live,
    /// Test mode data
    Test,
}

/// Transaction type filter
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransactionTypeArg {
    Any,
    Charge,
    Rebill,
    Refund,
    Cancel,
}

/// Per-affiliate actions
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AffiliateActionArg {
    Favorite,
    Unfavorite,
    Register,
    Approve,
    Reject,
    CustomCommissions,
    Delete,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<ModeArg> for thrivecart_core::Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Live => thrivecart_core::Mode::Live,
            ModeArg::Test => thrivecart_core::Mode::Test,
        }
    }
}

impl From<TransactionTypeArg> for thrivecart_core::TransactionType {
    fn from(kind: TransactionTypeArg) -> Self {
        match kind {
            TransactionTypeArg::Any => thrivecart_core::TransactionType::Any,
            TransactionTypeArg::Charge => thrivecart_core::TransactionType::Charge,
            TransactionTypeArg::Rebill => thrivecart_core::TransactionType::Rebill,
            TransactionTypeArg::Refund => thrivecart_core::TransactionType::Refund,
            TransactionTypeArg::Cancel => thrivecart_core::TransactionType::Cancel,
        }
    }
}

impl From<AffiliateActionArg> for thrivecart_core::AffiliateAction {
    fn from(action: AffiliateActionArg) -> Self {
        use thrivecart_core::AffiliateAction;
        match action {
            AffiliateActionArg::Favorite => AffiliateAction::Favorite,
            AffiliateActionArg::Unfavorite => AffiliateAction::Unfavorite,
            AffiliateActionArg::Register => AffiliateAction::Register,
            AffiliateActionArg::Approve => AffiliateAction::Approve,
            AffiliateActionArg::Reject => AffiliateAction::Reject,
            AffiliateActionArg::CustomCommissions => AffiliateAction::CustomCommissions,
            AffiliateActionArg::Delete => AffiliateAction::Delete,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
