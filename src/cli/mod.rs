//! CLI argument parsing

use clap::Parser;
use webbench_core::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "webbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run duration in seconds
    #[arg(short = 't', long = "time", default_value_t = 30.0)]
    pub time: f64,

    /// Number of concurrent clients
    #[arg(short, long, default_value_t = 1000)]
    pub clients: usize,

    /// Target port
    #[arg(short, long, default_value_t = 443)]
    pub port: u16,

    /// Target host name or address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Request path for the index page
    #[arg(short = 'u', long = "url", default_value = "/index.html")]
    pub url: String,

    /// Skip server certificate verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration from the parsed arguments
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.clients)
            .with_duration_secs(self.time)
            .with_host(self.host.clone())
            .with_port(self.port)
            .with_path(self.url.clone())
            .with_insecure(self.insecure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["webbench"]);
        assert_eq!(cli.time, 30.0);
        assert_eq!(cli.clients, 1000);
        assert_eq!(cli.port, 443);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.url, "/index.html");
        assert!(!cli.insecure);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "webbench", "-t", "10", "-c", "50", "-p", "8443", "-H", "example.com", "-u", "/", "-k",
        ]);
        assert_eq!(cli.time, 10.0);
        assert_eq!(cli.clients, 50);
        assert_eq!(cli.port, 8443);
        assert_eq!(cli.host, "example.com");
        assert_eq!(cli.url, "/");
        assert!(cli.insecure);
    }

    #[test]
    fn test_cli_builds_valid_config() {
        let cli = Cli::parse_from(["webbench", "-c", "5"]);
        let config = cli.run_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.clients, 5);
    }
}
