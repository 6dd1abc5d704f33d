use clap::{Parser, Subcommand};

/// Command-line interface definition for arecanut
/// CLI application to store arecanut prices in SQLite and predict upcoming ones
#[derive(Parser)]
#[command(
    name = "arecanut",
    version = env!("CARGO_PKG_VERSION"),
    about = "Arecanut price predictor: upload market prices, chart seasonal trends and predict upcoming prices",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override model artifact path
    #[arg(global = true, long = "model")]
    pub model: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Log in with a configured user
    Login {
        #[arg(long = "user", short = 'u', help = "Username")]
        user: String,

        #[arg(long = "password", short = 'p', help = "Password")]
        password: String,
    },

    /// Close the current session
    Logout,

    /// Upload a CSV file with `date` and `modal_price` columns
    Upload {
        /// Path of the CSV file
        file: String,
    },

    /// List stored price records in upload order
    List {
        #[arg(long = "limit", help = "Show only the last N records")]
        limit: Option<usize>,
    },

    /// Show the price trend and the average price per month
    Visualize {
        #[arg(long = "trend", help = "Show only the price trend over time")]
        trend: bool,

        #[arg(long = "monthly", help = "Show only the average price by month")]
        monthly: bool,
    },

    /// Train the model on all stored records and persist it
    Train,

    /// Predict the modal price for an upcoming month
    Predict {
        #[arg(long = "month", short = 'm', help = "Upcoming month (1-12)")]
        month: u32,

        #[arg(
            long = "lag",
            help = "Last known modal price (default: latest stored price)"
        )]
        lag: Option<f64>,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (integrity checks, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show information about the project
    About,
}
