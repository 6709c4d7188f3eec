//! Plumbing shared by the VCI network tools: logging, timing nested steps, running external
//! commands, and naming the files those tools write.

pub mod logger;
mod process;
mod time;
mod utils;

pub use crate::process::run_cmd;
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::{insert_suffix, prettyprint_usize, sibling_path, timestamp, true_basename};
