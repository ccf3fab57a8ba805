use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deckprofile")]
#[command(about = "Activate a capture device profile and wait for the driver to confirm it", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Index of the device to configure
    #[arg(short = 'd', long = "device", value_name = "DEVICE ID")]
    pub device: Option<usize>,

    /// Index of the profile to activate on the selected device
    #[arg(short = 'p', long = "profile", value_name = "PROFILE ID")]
    pub profile: Option<usize>,

    /// Seconds to wait for the driver to confirm the change (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show devices and profiles
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every device and the profiles it offers
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show config status and location, or create default config if missing
    InitConfig,
}

impl Cli {
    /// Device and profile indices, when both were given
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.device.zip(self.profile)
    }

    /// Usage is shown on request or when the selection is incomplete;
    /// a complete selection is still activated after `-h`.
    pub fn shows_usage(&self) -> bool {
        self.help || self.selection().is_none()
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
