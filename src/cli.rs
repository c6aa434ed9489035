use crate::config::DsgenConfig;
use crate::form::parse_field_assignment;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "dsgen",
    about = "Generate Digital Sales API test payloads from a form",
    long_about = "dsgen fills a small form, sends it to the payload generator backend and previews the JSON it returns. Payloads can be copied, exported as JSON, and the session history exported as CSV.",
    version
)]
pub struct Cli {
    /// Base URL of the generator backend
    #[arg(long, env = "DSGEN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Directory exported files are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Pre-fill a form field, e.g. --field role=MAIN (repeatable)
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field_assignment)]
    pub fields: Vec<(String, String)>,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Generate one payload, print it and exit
    #[arg(long)]
    pub once: bool,

    /// With --once, also save the payload as a JSON file
    #[arg(long, requires = "once")]
    pub export: bool,

    /// With --once, also copy the payload to the clipboard
    #[arg(long, requires = "once")]
    pub copy: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags win over config files.
    pub fn apply_to(&self, config: &mut DsgenConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_and_overrides() {
        let cli = Cli::try_parse_from([
            "dsgen",
            "--endpoint",
            "http://localhost:9000",
            "-f",
            "role=MAIN",
            "--field",
            "amount=100",
            "--timeout",
            "10",
        ])
        .unwrap();

        assert_eq!(
            cli.fields,
            vec![
                ("role".to_string(), "MAIN".to_string()),
                ("amount".to_string(), "100".to_string())
            ]
        );

        let mut config = DsgenConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_export_requires_once() {
        assert!(Cli::try_parse_from(["dsgen", "--export"]).is_err());
        assert!(Cli::try_parse_from(["dsgen", "--once", "--export"]).is_ok());
    }

    #[test]
    fn test_bad_field_is_rejected() {
        assert!(Cli::try_parse_from(["dsgen", "--field", "role"]).is_err());
    }
}
