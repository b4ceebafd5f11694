use std::ffi::OsString;
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{debug, warn};

use crate::app;
use crate::args::PollArgs;
use crate::error::AppResult;
use crate::poll::PollConfig;

pub(crate) fn run() -> AppResult<ExitCode> {
    let (mut args, matches) = parse_args(std::env::args_os())?;
    apply_config(&mut args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);
    debug!("Resolved arguments: {:?}", args);

    let config = PollConfig::from_args(&args)?;
    if !config.verify_tls() {
        warn!("--insecure set: certificates and hostnames will not be verified.");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(app::run_local(config))
}

fn parse_args<I>(raw_args: I) -> AppResult<(PollArgs, ArgMatches)>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = PollArgs::command().get_matches_from(raw_args);
    let args = PollArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut PollArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
