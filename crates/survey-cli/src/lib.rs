//! Library side of the survey CLI: logging setup and the staged pipeline the
//! subcommands drive.

pub mod logging;
pub mod pipeline;
pub mod types;
