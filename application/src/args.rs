//! [`Args`] definitions.

use clap::{Parser, Subcommand, ValueEnum};
use service::domain::lead;

/// Command line client of the referral network call center.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Prints the worklist of leads assigned for the given kind.
    Leads {
        /// Kind of the leads to fetch.
        #[arg(value_enum)]
        kind: KindArg,
    },

    /// Marks a lead as contacted on this device.
    Contact {
        /// Kind of the lead to mark.
        #[arg(value_enum)]
        kind: KindArg,

        /// ID of the lead to mark.
        id: String,
    },

    /// Reports a finished call for a lead to the backend.
    CompleteCall {
        /// ID of the lead whose call is finished.
        id: String,
    },

    /// Prints the property listing with aging tags.
    Properties,

    /// Adds a property to the liked set of this device.
    Like {
        /// ID of the property to like.
        id: String,
    },

    /// Removes a property from the liked set of this device.
    Unlike {
        /// ID of the property to unlike.
        id: String,
    },

    /// Keeps polling assigned worklists and prints every published snapshot.
    Watch,
}

/// Kind of leads to operate on.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    /// Registered customers.
    Customer,

    /// Registered agents.
    Agent,

    /// Core members of the network.
    CoreMember,

    /// Domain experts.
    Expert,
}

impl From<KindArg> for lead::Kind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Customer => Self::Customer,
            KindArg::Agent => Self::Agent,
            KindArg::CoreMember => Self::CoreMember,
            KindArg::Expert => Self::Expert,
        }
    }
}
