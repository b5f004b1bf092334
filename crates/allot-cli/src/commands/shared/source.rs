use std::fs::File;

use anyhow::Context;

/// Open a CSV import file named on the command line.
pub fn open_csv(path: &str) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("failed to open import file '{path}'"))
}
