use std::path::{Path, PathBuf};

use crate::poll::*;

/// Paths in the configuration are relative to the directory of the configuration file.
pub fn resolve_path(root_path: &Path, file_path: &str) -> String {
    let p: PathBuf = root_path.join(file_path);
    p.as_path().display().to_string()
}

pub fn parse_setup_amount(s: &str, lineno: usize) -> PollResult<u32> {
    s.trim()
        .parse::<u32>()
        .ok()
        .context(InvalidSetupAmountSnafu { lineno, content: s })
}
