use std::time::Instant;

use darion_engine::{SortResult, sort_files};
use darion_runtime::{
    AgentConfig,
    history::{HistoryStore, SortEvent},
};
use log::{info, warn};

use crate::{
    collaborators::{ChatMessage, CompletionService, Role, Service, SyncAdapter},
    intent::{Intent, IntentClassifier, IntentParams, KeywordClassifier},
};

pub const GENERAL_SYSTEM_PROMPT: &str = "You are a helpful assistant that can sort and \
organize local files and synchronize Outlook, OneDrive, Gmail and calendar data. \
Answer the user's question concisely.";

const EMPTY_QUERY_REPLY: &str = "Please provide a valid query.";
const MISSING_DIRS_REPLY: &str =
    "Please provide both source and destination directories for file sorting.";
const NO_COMPLETION_REPLY: &str =
    "I can only sort files and sync services right now; no completion service is configured.";
const COMPLETION_FAILED_REPLY: &str =
    "I encountered an error while processing your request. Please try again later.";

/// Routes a free-text request to the sorter, a sync adapter or the
/// completion service.
pub struct Assistant {
    config: AgentConfig,
    classifier: Box<dyn IntentClassifier>,
    adapters: Vec<Box<dyn SyncAdapter>>,
    completion: Option<Box<dyn CompletionService>>,
    history: Option<HistoryStore>,
}

impl Assistant {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            classifier: Box::new(KeywordClassifier),
            adapters: Vec::new(),
            completion: None,
            history: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl IntentClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn with_adapter(mut self, adapter: impl SyncAdapter + 'static) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    pub fn with_completion(mut self, completion: impl CompletionService + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = Some(history);
        self
    }

    pub fn process_query(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            warn!("[assistant] empty query");
            return EMPTY_QUERY_REPLY.to_owned();
        }

        info!("[assistant] processing query: {query}");
        let classification = self.classifier.classify(query);

        match classification.intent {
            Intent::SortFiles => self.handle_sort(&classification.params),
            Intent::SyncOutlook => self.sync(Service::Outlook),
            Intent::SyncOneDrive => self.sync(Service::OneDrive),
            Intent::SyncGmail => self.sync(Service::Gmail),
            Intent::SyncCalendar => self.sync(Service::Calendar),
            Intent::SyncAll => Service::ALL
                .iter()
                .map(|s| self.sync(*s))
                .collect::<Vec<_>>()
                .join("\n"),
            Intent::GeneralQuery => self.answer(query),
        }
    }

    fn handle_sort(&self, params: &IntentParams) -> String {
        let (Some(source), Some(dest)) = (&params.source_dir, &params.dest_dir) else {
            return MISSING_DIRS_REPLY.to_owned();
        };

        let criterion = params
            .criterion
            .as_deref()
            .unwrap_or(&self.config.default_criterion);
        let recursive = params.recursive.unwrap_or(self.config.default_recursive);

        let started = Instant::now();
        let result = sort_files(source, dest, criterion, recursive, &self.config);

        if let Some(history) = &self.history {
            let elapsed = started.elapsed().as_millis().min(u32::MAX as u128) as u32;
            let event = SortEvent::new(
                source.clone(),
                dest.clone(),
                criterion.to_owned(),
                recursive,
                elapsed,
            );
            history.log_sort(match &result.statistics {
                Some(st) => event.succeeded(st.total_files, st.total_size),
                None => event,
            });
        }

        sort_reply(&result)
    }

    fn sync(&self, service: Service) -> String {
        let Some(adapter) = self.adapters.iter().find(|a| a.service() == service) else {
            return format!("{service} sync is not configured.");
        };

        match adapter.fetch_latest() {
            Ok(items) => format!("Successfully synced {} items from {service}.", items.len()),
            Err(e) => {
                warn!("[assistant] {service} sync failed: {e:#}");
                format!("Failed to sync {service} data.")
            }
        }
    }

    fn answer(&self, query: &str) -> String {
        let Some(completion) = &self.completion else {
            return NO_COMPLETION_REPLY.to_owned();
        };

        let messages = [
            ChatMessage::new(Role::System, GENERAL_SYSTEM_PROMPT),
            ChatMessage::new(Role::User, query),
        ];

        match completion.complete(&messages) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("[assistant] completion failed: {e:#}");
                COMPLETION_FAILED_REPLY.to_owned()
            }
        }
    }
}

fn sort_reply(result: &SortResult) -> String {
    match &result.statistics {
        Some(st) if result.success => format!(
            "Successfully sorted {} files into categories. Total size processed: {} bytes.",
            st.total_files, st.total_size
        ),
        _ => format!("Failed to sort files: {}", result.message),
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
