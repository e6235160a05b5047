use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List sessions with their booking state.
    Sessions(SessionsArgs),
    /// List the distinct class locations.
    Locations,
    /// List the sessions you are booked into.
    Booked,
    /// Book sessions by id.
    Book(BookArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SessionsArgs {
    /// Only show sessions at this location (repeatable).
    #[arg(short = 'L', long = "location", value_name = "LOCATION")]
    pub locations: Vec<String>,

    /// Hide sessions you are already booked into.
    #[arg(long)]
    pub unbooked: bool,
}

#[derive(Clone, Debug, Args)]
pub struct BookArgs {
    /// Session ids, as shown in the `id` column of `cfcr sessions`.
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<String>,

    /// Show what would be booked without touching the cart.
    #[arg(long)]
    pub dry_run: bool,
}
