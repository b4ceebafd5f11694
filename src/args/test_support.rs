use clap::Parser;

use crate::error::{AppError, AppResult};

use super::PollArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<PollArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    PollArgs::try_parse_from(args).map_err(AppError::from)
}
