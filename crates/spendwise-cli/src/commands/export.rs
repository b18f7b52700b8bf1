//! Export command implementation

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spendwise_core::export::default_file_name;
use spendwise_core::{RemoteStore, Tracker};

/// Write the month view as CSV; `output` defaults to `Expense_Tracker_YYYY-MM.csv`
pub fn cmd_export<R: RemoteStore>(tracker: &Tracker<R>, output: Option<&Path>) -> Result<()> {
    // Render first so an empty month never leaves an empty file behind
    let mut csv = Vec::new();
    let count = match tracker.export_csv(&mut csv) {
        Ok(count) => count,
        Err(spendwise_core::Error::Validation(msg)) => {
            println!("{}", msg);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_file_name(&tracker.period())));

    let mut file = File::create(&path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    file.write_all(&csv)?;

    println!("✅ Exported {} transactions to {}", count, path.display());
    Ok(())
}
