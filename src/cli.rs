use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "geoform", about = "Resolve states and cities from the geography API")]
pub struct Args {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL from the config file
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Select a state and list its cities
    #[arg(long, value_name = "NAME")]
    pub state: Option<String>,

    /// Print the full pipeline snapshot as JSON
    #[arg(long)]
    pub json: bool,
}
