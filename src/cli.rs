//! Command line interface

use clap::Parser;

use crate::region::Region;

/// Watches a screen region for a countdown and plays alert sounds
#[derive(Debug, Parser)]
#[command(name = "countdown-alert", version, about)]
pub struct Cli {
    /// Save the screen region to monitor, then test OCR on it
    #[arg(long, requires = "region", conflicts_with = "test")]
    pub setup: bool,

    /// Region in absolute screen coordinates (used with --setup)
    #[arg(long, value_name = "LEFT,TOP,WIDTH,HEIGHT", requires = "setup")]
    pub region: Option<Region>,

    /// Capture the saved region once, write a debug image and print the reading
    #[arg(long)]
    pub test: bool,
}

/// What the program should do this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Setup(Region),
    Test,
    Run,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match (self.setup, self.region, self.test) {
            (true, Some(region), _) => Mode::Setup(region),
            (_, _, true) => Mode::Test,
            _ => Mode::Run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("countdown-alert").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_is_run() {
        assert_eq!(parse(&[]).unwrap().mode(), Mode::Run);
    }

    #[test]
    fn test_setup_with_region() {
        let cli = parse(&["--setup", "--region", "10,20,30,40"]).unwrap();
        assert_eq!(cli.mode(), Mode::Setup(Region::new(10, 20, 30, 40).unwrap()));
    }

    #[test]
    fn test_test_mode() {
        assert_eq!(parse(&["--test"]).unwrap().mode(), Mode::Test);
    }

    #[test]
    fn test_invalid_combinations() {
        assert!(parse(&["--setup"]).is_err());
        assert!(parse(&["--region", "1,2,3,4"]).is_err());
        assert!(parse(&["--setup", "--region", "1,2,3,4", "--test"]).is_err());
        assert!(parse(&["--setup", "--region", "1,2,0,4"]).is_err());
    }
}
