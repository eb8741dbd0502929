use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::client::SocialGraphClient;
use crate::config::{Config, Settings};
use crate::copy::{copy_follows, CopyRequest};
use crate::display::Progress;

#[derive(Parser, Debug)]
#[command(name = "bsky-spy", version)]
#[command(
    about = "Create a Bluesky list from someone's follows",
    after_help = "Example:\n  BSKY_HANDLE=me.bsky.social BSKY_APP_KEY=xxxx bsky-spy --name \"Tech Folks\" techperson.bsky.social"
)]
pub struct Cli {
    /// Bluesky handle to copy follows from (e.g., user.bsky.social)
    pub handle: String,

    /// Name for the new list
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Your Bluesky handle
    #[arg(long, env = "BSKY_HANDLE", hide_env_values = true)]
    pub login: Option<String>,

    /// Your app password (Settings > App Passwords)
    #[arg(long, env = "BSKY_APP_KEY", hide_env_values = true)]
    pub app_key: Option<String>,

    /// XRPC base URL (overrides config)
    #[arg(long, env = "BSKY_API_URL")]
    pub api_url: Option<String>,

    /// Milliseconds to wait after each list member is added (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the login handle and app password, rejecting blanks.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.login.as_deref(), self.app_key.as_deref()) {
            (Some(login), Some(app_key)) if !login.is_empty() && !app_key.is_empty() => {
                Ok((login, app_key))
            }
            _ => anyhow::bail!("BSKY_HANDLE and BSKY_APP_KEY environment variables are required"),
        }
    }

    pub async fn run(self) -> Result<()> {
        let (identifier, password) = self.credentials()?;

        let config = Config::load()?;
        let settings = Settings::resolve(self.api_url.clone(), self.delay_ms, &config);
        tracing::debug!(?settings, "resolved settings");

        let mut client =
            SocialGraphClient::new(&settings.api_url).context("Failed to create API client")?;

        let request = CopyRequest {
            identifier,
            password,
            target: &self.handle,
            list_name: &self.name,
            member_delay: settings.member_delay,
        };

        copy_follows(&mut client, &request, &mut Progress::new()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn name_flag_is_required() {
        let err = Cli::try_parse_from(["bsky-spy", "alice.bsky.social"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Cli::try_parse_from(["bsky-spy", "--name", "", "alice.bsky.social"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn accepts_every_name_spelling() {
        for args in [
            ["bsky-spy", "--name", "Tech Folks", "alice.bsky.social"].as_slice(),
            ["bsky-spy", "--name=Tech Folks", "alice.bsky.social"].as_slice(),
            ["bsky-spy", "-n", "Tech Folks", "alice.bsky.social"].as_slice(),
            ["bsky-spy", "alice.bsky.social", "-n=Tech Folks"].as_slice(),
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.name, "Tech Folks");
            assert_eq!(cli.handle, "alice.bsky.social");
        }
    }

    #[test]
    fn rejects_extra_positionals_and_unknown_flags() {
        let err = Cli::try_parse_from(["bsky-spy", "-n", "x", "a.bsky.social", "b.bsky.social"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Cli::try_parse_from(["bsky-spy", "-n", "x", "--bogus", "a.bsky.social"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Cli::try_parse_from(["bsky-spy", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let mut cli = Cli::try_parse_from([
            "bsky-spy",
            "-n",
            "x",
            "--login",
            "me.bsky.social",
            "--app-key",
            "",
            "a.bsky.social",
        ])
        .unwrap();
        assert!(cli.credentials().is_err());

        cli.app_key = Some("abcd-efgh".to_string());
        assert_eq!(cli.credentials().unwrap(), ("me.bsky.social", "abcd-efgh"));

        cli.login = None;
        let err = cli.credentials().unwrap_err();
        assert!(err.to_string().contains("BSKY_HANDLE and BSKY_APP_KEY"));
    }
}
