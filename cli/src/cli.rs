use std::path::PathBuf;

/// Census 2010 SF1 choropleth CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "sf1map", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Join a census field to block polygons and write geoid,value rows
    Render(RenderArgs),

    /// List the field codes in the data dictionary
    Fields(FieldsArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// JSON run configuration
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Field code to map, e.g. P0010001
    pub field: String,

    /// Output CSV file, defaults to "./{field}.csv"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Only map these states (by abbreviation), defaults to all configured states
    #[arg(short, long)]
    pub state: Vec<String>,

    /// Divide values by land area
    #[arg(long)]
    pub density: bool,

    /// Divide values by total population
    #[arg(long)]
    pub percentage: bool,

    /// Fail on polygons with zero population instead of mapping them to 0
    #[arg(long, requires = "percentage")]
    pub strict: bool,

    /// Bounding box: LON_MIN LON_MAX LAT_MIN LAT_MAX
    #[arg(long, num_args = 4, value_names = ["LON_MIN", "LON_MAX", "LAT_MIN", "LAT_MAX"], allow_negative_numbers = true)]
    pub bbox: Option<Vec<f64>>,

    /// Fixed upper bound for the color scale
    #[arg(long, conflicts_with = "top")]
    pub vmax: Option<f64>,

    /// Upper bound is the smallest of the largest FRACTION of values
    #[arg(long, value_name = "FRACTION")]
    pub top: Option<f64>,

    /// Lower bound is the smallest value rather than 0
    #[arg(long)]
    pub vmin_auto: bool,
}

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    /// SF1 data field descriptor table
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub descriptors: PathBuf,

    /// Only list codes starting with this prefix, e.g. P003
    #[arg(short, long)]
    pub prefix: Option<String>,
}
