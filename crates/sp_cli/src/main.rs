use std::net::SocketAddr;

use clap::Parser;
use sp_core::{logging::init_logging, Config, Sentiment};
use sp_inference::{create_classifier, Language};
use sp_sources::{handle_command, handle_suggest, NewsArgs, NewsManager, SuggestArgs, SuggestionService};
use sp_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Stock news sentiment service", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log: String,
    /// Label every text with this sentiment instead of calling the inference API
    #[arg(long, global = true, value_parser = parse_sentiment)]
    offline: Option<Sentiment>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on; defaults to BIND_ADDR or 127.0.0.1:8000
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Fetch and classify news from the command line
    News(NewsArgs),
    /// Classify a single text
    Classify {
        #[arg(long, value_enum, default_value = "en")]
        lang: Language,
        text: String,
    },
    /// List ticker suggestions
    Suggest(SuggestArgs),
}

fn parse_sentiment(value: &str) -> std::result::Result<Sentiment, String> {
    Sentiment::ALL
        .into_iter()
        .find(|sentiment| sentiment.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("expected one of positive, negative, neutral; got {}", value))
}

fn news_manager(config: &Config, offline: Option<Sentiment>) -> anyhow::Result<NewsManager> {
    let english = create_classifier(Language::English, config, offline)?;
    let korean = create_classifier(Language::Korean, config, offline)?;
    info!(
        english = english.model_id(),
        korean = korean.model_id(),
        "🧠 Sentiment classifiers initialized"
    );
    Ok(NewsManager::from_config(config, english, korean)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind_addr);
            let news = news_manager(&config, cli.offline)?;
            let suggestions = SuggestionService::from_config(&config)?;
            sp_web::serve(AppState::new(news, suggestions), addr, &config.allowed_origins).await?;
        }
        Commands::News(args) => {
            let manager = news_manager(&config, cli.offline)?;
            handle_command(args, &manager).await?;
        }
        Commands::Classify { lang, text } => {
            let classifier = create_classifier(lang, &config, cli.offline)?;
            let sentiment = classifier.classify_or_neutral(&text).await;
            println!("{}", sentiment);
        }
        Commands::Suggest(args) => {
            let service = SuggestionService::from_config(&config)?;
            handle_suggest(args, &service).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentiment() {
        assert_eq!(parse_sentiment("Positive").unwrap(), Sentiment::Positive);
        assert_eq!(parse_sentiment(" neutral ").unwrap(), Sentiment::Neutral);
        assert!(parse_sentiment("label_2").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["sp", "classify", "--lang", "ko", "--offline", "negative", "주가 급락"]).unwrap();
        assert_eq!(cli.offline, Some(Sentiment::Negative));
        match cli.command {
            Commands::Classify { lang, text } => {
                assert_eq!(lang, Language::Korean);
                assert_eq!(text, "주가 급락");
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["sp", "--log", "debug", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        assert_eq!(cli.log, "debug");
        assert!(matches!(cli.command, Commands::Serve { bind: Some(addr) } if addr.port() == 9000));

        assert!(Cli::try_parse_from(["sp", "classify", "--lang", "fr", "x"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
