use clap::{Args, Subcommand};
use sp_core::{GlobalNewsResponse, KoreanNewsResponse, Market, Result};

use crate::manager::NewsManager;
use crate::suggest::SuggestionService;

#[derive(Args, Debug)]
pub struct NewsArgs {
    #[command(subcommand)]
    pub command: NewsCommands,
}

#[derive(Subcommand, Debug)]
pub enum NewsCommands {
    /// Fetch and classify English news for a ticker symbol (e.g. AAPL)
    Global {
        symbol: String,
    },
    /// Fetch and classify Korean news for a company name (e.g. 삼성전자)
    Korea {
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Market to list suggestions for: global or korea
    pub market: Market,
}

pub async fn handle_command(args: NewsArgs, manager: &NewsManager) -> Result<()> {
    let json = match args.command {
        NewsCommands::Global { symbol } => {
            let response = GlobalNewsResponse::from(manager.global_news(&symbol).await?);
            serde_json::to_string_pretty(&response)?
        }
        NewsCommands::Korea { name } => {
            let response = KoreanNewsResponse::from(manager.korean_news(&name).await);
            serde_json::to_string_pretty(&response)?
        }
    };
    println!("{}", json);
    Ok(())
}

pub async fn handle_suggest(args: SuggestArgs, service: &SuggestionService) -> Result<()> {
    let suggestions = service.suggestions(args.market).await?;
    println!("{}", serde_json::to_string_pretty(suggestions.as_ref())?);
    Ok(())
}
