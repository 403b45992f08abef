use clap::Parser as _;
use tracing::{error, info};

use artifetch::{
    Config, Fetcher,
    models::args::AppArgs,
    utils::{dir::DirUtils, errors::EmptyResult, logger::LoggerUtils, progress::ProgressUtils},
};

fn main() -> EmptyResult {
    let args = AppArgs::parse();

    LoggerUtils::init(args.verbose);

    let version = env!("CARGO_PKG_VERSION");
    info!("artifetch, Version: {version}");

    let config = Config::load(args.config.as_deref())?;
    let request = args.to_request(&config)?;
    let fetcher = Fetcher::from_config(&config);

    let spinner = ProgressUtils::display_loader(format!("Fetching {}", request.url()));
    let result = fetcher.fetch_request(&request);
    spinner.finish_and_clear();

    let path = result.inspect_err(|err| error!("{}", err))?;

    let path = match &args.output {
        Some(output) => {
            DirUtils::move_file(&path, output)?;
            output.clone()
        }
        None => path,
    };

    println!("{}", path.display());
    Ok(())
}
