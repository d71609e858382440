use clap::Parser;
use mediafree::core::{MediaItem, MediaKind};
use mediafree::{AggregatedResult, Config, Response, extract, proxy_media};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mediafree",
    about = "Resolve media links from social platforms",
    long_about = "Resolve a post URL into its downloadable media variants, ranked by resolution.\n\
    Supports Twitter/X, TikTok and Pinterest.\n\n\
    Examples:\n\
      mediafree https://x.com/user/status/1234567890123        # Print JSON payload\n\
      mediafree 1234567890123                                  # Bare tweet id\n\
      mediafree -d ./media https://x.com/user/status/12345...  # Download best variants"
)]
struct Args {
    /// Post URL or bare tweet id
    #[arg(help = "Post URL or bare tweet id")]
    url: String,

    /// Download the best variant of every media item to this directory
    #[arg(short = 'd', long = "dir", help = "Download best variants to directory")]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Overall request timeout in seconds
    #[arg(long, env = "MEDIAFREE_TIMEOUT")]
    timeout: Option<u64>,

    /// User-Agent sent upstream
    #[arg(long = "user-agent", env = "MEDIAFREE_USER_AGENT")]
    user_agent: Option<String>,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(ua) = &self.user_agent {
            config = config.with_user_agent(ua.clone());
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mediafree=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn extension(item: &MediaItem, content_type: &str) -> &'static str {
    match content_type.split(';').next().unwrap_or_default().trim() {
        "video/mp4" => "mp4",
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => match item.kind {
            MediaKind::Photo => "jpg",
            _ => "mp4",
        },
    }
}

async fn download_all(
    result: &AggregatedResult,
    dir: &Path,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(dir).await?;
    let stem = &result.download_info.suggested_filenames.simple;

    for (index, item) in result.media.iter().enumerate() {
        let media = proxy_media(&item.download_url, None, config).await?;
        let filename = format!(
            "{}_{}.{}",
            stem,
            index + 1,
            extension(item, &media.content_type)
        );
        let path = dir.join(filename);
        tokio::fs::write(&path, &media.bytes).await?;
        eprintln!("✓ Saved to: {}", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = args.config();

    let result = extract(&args.url, &config).await;
    let failed = result.is_err();
    let response = match &result {
        Ok(result) => Response::success(result),
        Err(e) => {
            eprintln!("Error: {}", e);
            Response::failure(e)
        }
    };

    match serde_json::to_string_pretty(&response.body) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: {}", e),
    }
    if failed {
        std::process::exit(1);
    }

    if let (Ok(result), Some(dir)) = (&result, &args.output_dir)
        && let Err(e) = download_all(result, dir, &config).await
    {
        eprintln!("Failed to download media: {}", e);
        std::process::exit(1);
    }
}
