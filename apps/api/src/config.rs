use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base of the URLs handed back to callers. Defaults to `s3_endpoint`.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Compiler command line, e.g. `pdflatex` or `xelatex -shell-escape`.
    pub latex_command: Vec<String>,
    pub compile_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;

        Ok(Config {
            s3_bucket: require_env("S3_BUCKET")?,
            s3_public_url: std::env::var("S3_PUBLIC_URL").unwrap_or_else(|_| s3_endpoint.clone()),
            s3_endpoint,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            latex_command: parse_command(
                &std::env::var("LATEX_PROGRAM").unwrap_or_else(|_| "pdflatex".to_string()),
            )?,
            compile_timeout_secs: std::env::var("COMPILE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("COMPILE_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_command(raw: &str) -> Result<Vec<String>> {
    let parts: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    anyhow::ensure!(!parts.is_empty(), "LATEX_PROGRAM must not be empty");
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_splits_on_whitespace() {
        assert_eq!(parse_command("pdflatex").unwrap(), vec!["pdflatex"]);
        assert_eq!(
            parse_command("  xelatex   -shell-escape ").unwrap(),
            vec!["xelatex", "-shell-escape"]
        );
        assert!(parse_command("   ").is_err());
    }
}
