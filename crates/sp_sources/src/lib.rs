pub mod cli;
pub mod manager;
pub mod pipeline;
pub mod sources;
pub mod suggest;

pub use manager::NewsManager;
pub use pipeline::aggregate;
pub use sources::{NaverNewsScraper, YahooNewsClient};
pub use suggest::{Suggestion, SuggestionService};

pub use cli::{handle_command, handle_suggest, NewsArgs, NewsCommands, SuggestArgs};

pub mod prelude {
    pub use super::manager::NewsManager;
    pub use super::suggest::SuggestionService;
    pub use sp_core::{Article, Error, NewsSource, Result};
}
