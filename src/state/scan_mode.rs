//! Scan mode definitions
//!
//! The mode only changes what the planner puts on the work list; probing and
//! persistence behave the same either way.

use std::fmt;
use std::str::FromStr;

/// Selects which domains a run probes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ScanMode {
    /// Probe only domains that have never been checked
    #[default]
    Incremental,

    /// Re-probe every domain in the source list
    Full,
}

impl ScanMode {
    /// Returns the lowercase name used on the command line and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incremental" => Ok(Self::Incremental),
            "full" => Ok(Self::Full),
            other => Err(format!(
                "invalid scan mode '{}': expected 'incremental' or 'full'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_incremental() {
        assert_eq!(ScanMode::default(), ScanMode::Incremental);
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("incremental".parse::<ScanMode>(), Ok(ScanMode::Incremental));
        assert_eq!("full".parse::<ScanMode>(), Ok(ScanMode::Full));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!("Full".parse::<ScanMode>().is_err());
        assert!("partial".parse::<ScanMode>().is_err());
        assert!("".parse::<ScanMode>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for mode in [ScanMode::Incremental, ScanMode::Full] {
            assert_eq!(mode.to_string().parse::<ScanMode>(), Ok(mode));
        }
    }
}
