use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about = "Telegram bot for browsing an NFT catalogue", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Load catalogue items from a JSON file into the database
    SeedCatalogue {
        /// Path to a JSON array of { name, image, description } objects
        #[arg(short, long)]
        file: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
