use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use eu_life_expectancy::pipeline::{run, PipelineConfig};
use eu_life_expectancy::region::Region;
use eu_life_expectancy::PipelineResult;

#[derive(Parser)]
#[command(name = "eu-life-expectancy")]
#[command(about = "Clean the Eurostat life expectancy dataset for one country/region")]
#[command(version)]
struct Cli {
    /// Country or aggregate code to keep (e.g. PT, FR, EU27_2020)
    #[arg(default_value = "PT")]
    country: String,

    /// Input file name inside the data directory (.tsv or .json)
    #[arg(long, default_value = "eu_life_expectancy_raw.tsv")]
    file: String,

    /// Directory holding the input file and receiving the output file
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> PipelineResult<()> {
    let region = Region::from_code(&cli.country)?;
    let config = PipelineConfig::new(&cli.data_dir);
    let out = run(&config, region, &cli.file)?;
    println!("{}", out.display());
    Ok(())
}
