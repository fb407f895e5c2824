use clap::Parser;
#[macro_use]
extern crate log;

fn main() -> std::io::Result<()> {
    let args = somasim_cli::somasim_commands::Args::parse();
    let config = args.to_config()?;
    let level = somasim_cli::pipeline::log_level(config.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("START\t{:?}", config);
    somasim_cli::pipeline::run_pipeline(&config)?;
    debug!("END");
    Ok(())
}
