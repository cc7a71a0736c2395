use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use camosign::{EncodingVariant, ExtraHeaders, SignerConfig, UrlSigner};

#[derive(Parser)]
#[command(name = "camosign")]
#[command(about = "Generate and check Camo-style signed proxy URLs")]
struct Cli {
    /// HMAC key (overrides the config file)
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// JSON config file
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a URL and print the resulting proxy URL
    Encode {
        url: String,

        /// Base URL prefix for the output
        #[arg(long)]
        proxy_host: Option<String>,

        /// Use hex instead of base64url for the digest and URL segments
        #[arg(long)]
        hex: bool,

        /// Extra header to bind into the signature (repeatable)
        #[arg(long = "header", value_name = "NAME=VALUE")]
        headers: Vec<String>,

        /// Disable the scheme/port filter
        #[arg(long)]
        no_filter: bool,
    },
    /// Verify a proxy URL (or a bare /digest/url path) and print the original
    Decode { url: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camosign=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config_file {
        Some(path) => SignerConfig::load_from_file(path)?,
        None => SignerConfig::default(),
    };
    // Flags override the config file
    if let Some(key) = cli.key {
        config.hmac_key = key;
    }

    match cli.command {
        Commands::Encode {
            url,
            proxy_host,
            hex,
            headers,
            no_filter,
        } => {
            if let Some(host) = proxy_host {
                config.proxy_host = host;
            }
            if hex {
                config.encoding = EncodingVariant::Hex;
            }
            if no_filter {
                config.filter_ports = false;
            }

            let signer = UrlSigner::new(&config)?;
            let extra = parse_headers(&headers)?;
            let signed = signer.sign_with_headers(&url, &extra)?;
            println!("{signed}");
        }
        Commands::Decode { url } => {
            let signer = UrlSigner::new(&config)?;
            let path = if url.contains("://") {
                url::Url::parse(&url)?.path().to_string()
            } else {
                url
            };

            let (original, extra) = signer.decode_path(&path)?;
            println!("{original}");
            if let Some(extra) = extra {
                for (name, value) in extra {
                    println!("{name}: {value}");
                }
            }
        }
    }

    Ok(())
}

fn parse_headers(raw: &[String]) -> anyhow::Result<ExtraHeaders> {
    let mut out = ExtraHeaders::new();
    for item in raw {
        let (name, value) = item
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("header must be NAME=VALUE: {item}"))?;
        out.insert(name.to_string(), value.to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let raw = vec![
            "content-disposition=attachment".to_string(),
            "x-frame-options=deny".to_string(),
        ];
        let parsed = parse_headers(&raw).unwrap();
        assert_eq!(parsed.get("content-disposition").unwrap(), "attachment");
        assert_eq!(parsed.get("x-frame-options").unwrap(), "deny");
    }

    #[test]
    fn test_parse_headers_keeps_equals_in_value() {
        let raw = vec!["content-disposition=attachment; filename=\"a.png\"".to_string()];
        let parsed = parse_headers(&raw).unwrap();
        assert_eq!(
            parsed.get("content-disposition").unwrap(),
            "attachment; filename=\"a.png\""
        );
    }

    #[test]
    fn test_parse_headers_rejects_bare_name() {
        assert!(parse_headers(&["no-value".to_string()]).is_err());
    }
}
