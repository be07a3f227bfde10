/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;
use std::time::Instant;

use log::{Level, LevelFilter};

use crate::FailResult;

/// Set up the global logger.
///
/// `verbosity` is the number of `-v` flags: 0 is info, 1 debug, 2+ trace.
/// Timestamps are elapsed time since setup, which is the only clock a
/// batch tool needs.
pub fn init_global_logger(verbosity: u64) -> FailResult<()>
{Ok({
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let start = Instant::now();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let t = start.elapsed();
            out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                t.as_secs(),
                t.subsec_nanos() / 1_000_000,
                record.target(),
                ColorizedLevel(record.level()),
                message))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
})}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);

impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ansi_term::Colour::Red.bold(),
            Level::Warn => ansi_term::Colour::Red.normal(),
            Level::Info => ansi_term::Colour::Cyan.bold(),
            Level::Debug => ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(format!("{}", self.0)))
    }
}
