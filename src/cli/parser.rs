use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rHousebook
/// CLI application to track household work hours, income and debts
#[derive(Parser)]
#[command(
    name = "rhousebook",
    version = env!("CARGO_PKG_VERSION"),
    about = "A household bookkeeping CLI: track work hours, earnings, deductions and debts",
    long_about = None
)]
pub struct Cli {
    /// Override SQLite database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the JSON fallback store path
    #[arg(global = true, long = "store")]
    pub store: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and store files
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Add a work log entry
    Add {
        /// Date of the work (YYYY-MM-DD)
        date: String,

        /// Who worked (maru or marty); falls back to the configured default
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// Start time (HH:MM)
        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        /// End time (HH:MM)
        #[arg(long = "out", help = "End time (HH:MM)")]
        end: String,

        /// Break duration in minutes
        #[arg(long = "break", default_value_t = 0)]
        break_min: i64,

        /// Task category for the work
        #[arg(long = "activity", short = 'a')]
        activity: String,

        /// Free-form note
        #[arg(long = "note")]
        note: Option<String>,
    },

    /// List work log entries
    List {
        /// Filter by person (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long = "from")]
        from: Option<String>,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long = "to")]
        to: Option<String>,

        /// Filter by task category
        #[arg(long = "activity")]
        activity: Option<String>,
    },

    /// Edit a work log entry
    Edit {
        /// Id of the work log to edit
        id: String,

        #[arg(long = "person", short = 'p', help = "New person (maru or marty)")]
        person: Option<String>,

        #[arg(long = "date", help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "break", help = "New break duration in minutes")]
        break_min: Option<i64>,

        #[arg(long = "activity", short = 'a', help = "New task category")]
        activity: Option<String>,

        #[arg(long = "note", help = "New note")]
        note: Option<String>,
    },

    /// Delete a work log entry
    Del {
        /// Id of the work log to delete
        id: String,
    },

    /// Run the work timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },

    /// Track income and expenses
    Finance {
        #[command(subcommand)]
        action: FinanceAction,
    },

    /// Track debts
    Debt {
        #[command(subcommand)]
        action: DebtAction,
    },

    /// Record payments towards debts
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },

    /// Monthly earnings and deduction summary
    Summary {
        /// Filter by person (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,
    },

    /// Manage task and expense categories
    Category {
        #[command(subcommand)]
        kind: CategoryKindCmd,
    },

    /// Show or change the rent settings
    Rent {
        #[command(subcommand)]
        action: RentAction,
    },

    /// Export data in various formats
    Export {
        /// Collection to export
        #[arg(long = "what", value_enum, default_value = "worklogs")]
        what: ExportTarget,

        /// Export format: csv, json
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Filter by person (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long = "from")]
        from: Option<String>,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long = "to")]
        to: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup snapshot of the whole store
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the snapshot into a zip archive
        #[arg(long)]
        compress: bool,

        /// Overwrite destination without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the store contents with a backup snapshot
    Restore {
        /// Source file path (.json or .zip)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Skip the confirmation prompt
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Print or manage the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the timer, or resume it when paused
    Start {
        /// Who is working (maru or marty); falls back to the configured default
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// Task category for the session (required on a fresh start)
        #[arg(long = "activity", short = 'a')]
        activity: Option<String>,
    },

    /// Pause the running timer
    Pause,

    /// Stop the timer and record a work log
    Stop {
        /// Free-form note for the recorded log
        #[arg(long = "note")]
        note: Option<String>,
    },

    /// Show the current timer state
    Status {
        /// Refresh the elapsed time every second until the timer stops
        #[arg(long = "watch")]
        watch: bool,
    },
}

#[derive(Subcommand)]
pub enum FinanceAction {
    /// Add an income or expense record
    Add {
        /// Record kind: income or expense
        #[arg(long = "kind", short = 'k')]
        kind: String,

        /// What the money was for
        #[arg(long = "description", short = 'd')]
        description: String,

        /// Amount, must be positive
        #[arg(long = "amount", short = 'a')]
        amount: f64,

        /// Currency code; falls back to the configured default
        #[arg(long = "currency")]
        currency: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long = "date")]
        date: Option<String>,

        /// Category label
        #[arg(long = "category", short = 'c')]
        category: String,

        /// Person the record belongs to (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,
    },

    /// List finance records
    List {
        /// Filter by kind: income or expense
        #[arg(long = "kind", short = 'k')]
        kind: Option<String>,

        /// Filter by person (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long = "from")]
        from: Option<String>,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long = "to")]
        to: Option<String>,
    },

    /// Edit a finance record (debt payments are edited via `payment edit`)
    Edit {
        /// Id of the record to edit
        id: String,

        #[arg(long = "kind", short = 'k', help = "New kind: income or expense")]
        kind: Option<String>,

        #[arg(long = "description", short = 'd', help = "New description")]
        description: Option<String>,

        #[arg(long = "amount", short = 'a', help = "New amount")]
        amount: Option<f64>,

        #[arg(long = "currency", help = "New currency code")]
        currency: Option<String>,

        #[arg(long = "date", help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "category", short = 'c', help = "New category label")]
        category: Option<String>,

        #[arg(long = "person", short = 'p', help = "New person (maru or marty)")]
        person: Option<String>,
    },

    /// Delete a finance record (debt payments release their debt share)
    Del {
        /// Id of the record to delete
        id: String,
    },
}

#[derive(Subcommand)]
pub enum DebtAction {
    /// Record a new debt
    Add {
        /// Who owes (maru or marty); falls back to the configured default
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// What the debt is for
        #[arg(long = "description", short = 'd')]
        description: String,

        /// Total amount owed, must be positive
        #[arg(long = "amount", short = 'a')]
        amount: f64,

        /// Currency code; falls back to the configured default
        #[arg(long = "currency")]
        currency: Option<String>,
    },

    /// List debts with paid and remaining amounts
    List {
        /// Filter by person (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,

        /// Show only debts with a remaining balance
        #[arg(long = "open")]
        open: bool,
    },

    /// Edit a debt (the paid total only moves through payments)
    Edit {
        /// Id of the debt to edit
        id: String,

        #[arg(long = "person", short = 'p', help = "New person (maru or marty)")]
        person: Option<String>,

        #[arg(long = "description", short = 'd', help = "New description")]
        description: Option<String>,

        #[arg(long = "amount", short = 'a', help = "New total amount")]
        amount: Option<f64>,

        #[arg(long = "currency", help = "New currency code")]
        currency: Option<String>,
    },

    /// Delete a debt and every payment linked to it
    Del {
        /// Id of the debt to delete
        id: String,

        /// Skip the confirmation prompt
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PaymentAction {
    /// Record a payment towards a debt
    Add {
        /// Id of the debt being paid
        #[arg(long = "debt")]
        debt: String,

        /// Amount paid, must be positive
        #[arg(long = "amount", short = 'a')]
        amount: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long = "date")]
        date: Option<String>,
    },

    /// Change a payment's amount or move it to another debt
    Edit {
        /// Id of the payment record
        id: String,

        /// New amount
        #[arg(long = "amount", short = 'a')]
        amount: f64,

        /// Move the payment to this debt id
        #[arg(long = "debt")]
        debt: Option<String>,
    },

    /// Delete a payment, releasing its share from the debt
    Del {
        /// Id of the payment record
        id: String,
    },

    /// List open debts that can receive payments
    Debts {
        /// Filter by person (maru or marty)
        #[arg(long = "person", short = 'p')]
        person: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoryKindCmd {
    /// Task categories used by work logs and the timer
    Task {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Expense categories used by finance records
    Expense {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Register a category
    Add {
        /// Category name
        name: String,
    },

    /// Remove a category
    Del {
        /// Category name
        name: String,
    },

    /// List registered categories
    List,
}

#[derive(Subcommand)]
pub enum RentAction {
    /// Show the configured rent
    Show,

    /// Change the rent amount or due day
    Set {
        /// Monthly rent amount
        #[arg(long = "amount", short = 'a')]
        amount: Option<f64>,

        /// Day of the month the rent is due (1-31)
        #[arg(long = "day")]
        day: Option<u32>,
    },
}
