use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::data::model::Columns;

pub const DEFAULT_INPUT: &str = "result-p15.dat";
pub const DEFAULT_OUTPUT: &str = "plot.pdf";

// ---------------------------------------------------------------------------
// Command-line configuration
// ---------------------------------------------------------------------------

/// Plot the finite-size error of free energy and energy density against L.
#[derive(Debug, Clone, Parser)]
#[command(name = "fss-plot", version, about)]
pub struct Config {
    /// Whitespace-delimited results file with an `inf` reference row.
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where the log-log plot is written (PDF).
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Write the plot and exit without opening the viewer.
    #[arg(long)]
    pub no_show: bool,

    /// Zero-based column holding the free energy density.
    #[arg(long, default_value_t = 6)]
    pub free_energy_column: usize,

    /// Zero-based column holding the energy density.
    #[arg(long, default_value_t = 7)]
    pub energy_column: usize,
}

impl Config {
    /// Observable columns, checked against the tag column and each other.
    pub fn columns(&self) -> Result<Columns> {
        if self.free_energy_column == 0 || self.energy_column == 0 {
            bail!("column 0 holds the row tag and cannot be an observable");
        }
        if self.free_energy_column == self.energy_column {
            bail!(
                "free energy and energy cannot share column {}",
                self.energy_column
            );
        }
        Ok(Columns {
            free_energy: self.free_energy_column,
            energy: self.energy_column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_layout() {
        let config = Config::try_parse_from(["fss-plot"]).unwrap();
        assert_eq!(config.input, PathBuf::from("result-p15.dat"));
        assert_eq!(config.output, PathBuf::from("plot.pdf"));
        assert!(!config.no_show);
        assert_eq!(config.columns().unwrap(), Columns::default());
    }

    #[test]
    fn input_and_output_can_be_overridden() {
        let config =
            Config::try_parse_from(["fss-plot", "runs/p17.dat", "-o", "p17.pdf", "--no-show"])
                .unwrap();
        assert_eq!(config.input, PathBuf::from("runs/p17.dat"));
        assert_eq!(config.output, PathBuf::from("p17.pdf"));
        assert!(config.no_show);
    }

    #[test]
    fn bad_columns_are_rejected() {
        let tag = Config::try_parse_from(["fss-plot", "--energy-column", "0"]).unwrap();
        assert!(tag.columns().is_err());

        let shared = Config::try_parse_from([
            "fss-plot",
            "--free-energy-column",
            "3",
            "--energy-column",
            "3",
        ])
        .unwrap();
        assert!(shared.columns().is_err());
    }
}
