use sp_sources::{NewsManager, SuggestionService};

pub struct AppState {
    pub news: NewsManager,
    pub suggestions: SuggestionService,
}

impl AppState {
    pub fn new(news: NewsManager, suggestions: SuggestionService) -> Self {
        Self { news, suggestions }
    }
}
