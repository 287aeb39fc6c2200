use clap::Parser;

/// TOTP code generator with a TOML-backed account store
#[derive(Parser, Debug)]
#[command(name = "authcode", author, version, about, long_about = None)]
pub struct Cli {
    /// Account name (used with --secret)
    #[arg(short, long)]
    pub account: Option<String>,

    /// Set a new TOTP secret for --account, then print the current code
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Continuously print the current code until Ctrl-C
    #[arg(short, long)]
    pub watch: bool,

    /// Forget the configured account
    #[arg(long)]
    pub clear: bool,

    /// Print the active configuration document
    #[arg(short = 'd', long)]
    pub dump_config: bool,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_with_no_flags() {
        let cli = Cli::try_parse_from(["authcode"]).unwrap();
        assert!(cli.account.is_none());
        assert!(cli.secret.is_none());
        assert!(!cli.watch);
        assert!(!cli.clear);
        assert!(!cli.dump_config);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_help_flag_exits_with_help_error() {
        let result = Cli::try_parse_from(["authcode", "--help"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_version_flag_exits_with_version_error() {
        let result = Cli::try_parse_from(["authcode", "--version"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_secret_flags() {
        let cli = Cli::try_parse_from([
            "authcode",
            "--account",
            "alice",
            "--secret",
            "jbswy3dpehpk3pxp",
        ])
        .unwrap();
        assert_eq!(cli.account.as_deref(), Some("alice"));
        assert_eq!(cli.secret.as_deref(), Some("jbswy3dpehpk3pxp"));
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["authcode", "-a", "alice", "-s", "JBSWY3DP", "-w"]).unwrap();
        assert_eq!(cli.account.as_deref(), Some("alice"));
        assert_eq!(cli.secret.as_deref(), Some("JBSWY3DP"));
        assert!(cli.watch);
    }

    #[test]
    fn test_watch_flag() {
        let cli = Cli::try_parse_from(["authcode", "--watch"]).unwrap();
        assert!(cli.watch);
    }

    #[test]
    fn test_clear_flag() {
        let cli = Cli::try_parse_from(["authcode", "--clear"]).unwrap();
        assert!(cli.clear);
    }

    #[test]
    fn test_dump_config_flags() {
        let long = Cli::try_parse_from(["authcode", "--dump-config"]).unwrap();
        assert!(long.dump_config);
        let short = Cli::try_parse_from(["authcode", "-d"]).unwrap();
        assert!(short.dump_config);
    }

    #[test]
    fn test_debug_flag() {
        let cli = Cli::try_parse_from(["authcode", "--debug"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn test_unknown_flag_fails() {
        let result = Cli::try_parse_from(["authcode", "--invalid"]);
        assert!(result.is_err());
    }
}
