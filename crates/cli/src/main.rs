mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    //  Logging (stderr, so stdout stays machine-readable)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,modelfile=info,modelfile_cli=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.global.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let cfg = config::AppConfig::load_or_default(args.global.config.as_deref())?;
    let options = cfg.parse_options(args.global.max_token_size);

    match args.command {
        cli::Commands::Parse(parse_args) => cli::parse::execute(parse_args, &options, cfg.strict),
        cli::Commands::Fmt(fmt_args) => cli::fmt::execute(fmt_args, &options),
        cli::Commands::Config(c) => cli::config_cmd::execute(c, args.global.config.as_deref()),
    }
}
