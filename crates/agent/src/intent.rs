use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SortFiles,
    SyncOutlook,
    SyncOneDrive,
    SyncGmail,
    SyncCalendar,
    SyncAll,
    GeneralQuery,
}

/// Parameters a classifier could pull out of the text. Only sort intents
/// use them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntentParams {
    pub source_dir: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
    pub criterion: Option<String>,
    pub recursive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    pub params: IntentParams,
}

impl Classification {
    pub fn general() -> Self {
        Self {
            intent: Intent::GeneralQuery,
            params: IntentParams::default(),
        }
    }
}

/// Maps free text to an intent. Implementations can be rule based or
/// backed by a model; the assistant only sees this trait.
pub trait IntentClassifier {
    fn classify(&self, text: &str) -> Classification;
}

/// Keyword sets checked in order against the lowercased text.
const INTENT_RULES: &[(&[&str], Intent)] = &[
    (&["sort", "organize", "organise", "arrange"], Intent::SortFiles),
    (&["outlook"], Intent::SyncOutlook),
    (&["onedrive"], Intent::SyncOneDrive),
    (&["gmail"], Intent::SyncGmail),
    (&["calendar", "timetree"], Intent::SyncCalendar),
    (&["sync", "synchronize", "synchronise"], Intent::SyncAll),
];

const CRITERION_PHRASES: &[(&str, &str)] = &[
    ("by type", "type"),
    ("by date", "date"),
    ("by size", "size"),
    ("by name", "name"),
];

/// Negative phrases come first: "non-recursive" contains "recursive".
const RECURSION_PHRASES: &[(&str, bool)] = &[
    ("non-recursive", false),
    ("not recursive", false),
    ("no subfolders", false),
    ("without subfolders", false),
    ("top-level", false),
    ("recursive", true),
    ("subfolders", true),
];

/// Substring keyword matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();

        let Some(intent) = INTENT_RULES
            .iter()
            .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
            .map(|(_, intent)| *intent)
        else {
            return Classification::general();
        };

        let params = if intent == Intent::SortFiles {
            sort_params(text, &lower)
        } else {
            IntentParams::default()
        };

        Classification { intent, params }
    }
}

fn sort_params(text: &str, lower: &str) -> IntentParams {
    let criterion = CRITERION_PHRASES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, c)| (*c).to_owned());

    let recursive = RECURSION_PHRASES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, r)| *r);

    let tokens = tokenize(text);
    let keyword_at = |words: &[&str], from: usize| {
        tokens
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, t)| words.iter().any(|w| t.eq_ignore_ascii_case(w)))
            .map(|(i, _)| i)
    };

    let source_idx = keyword_at(&["from"], 0);
    // Without a source, the last "to"/"into" is the most likely destination
    // ("I want to sort ... into ~/x").
    let dest_idx = match source_idx {
        Some(i) => keyword_at(&["to", "into"], i + 2),
        None => tokens
            .iter()
            .rposition(|t| t.eq_ignore_ascii_case("to") || t.eq_ignore_ascii_case("into")),
    };

    let path_after = |idx: Option<usize>| {
        idx.and_then(|i| tokens.get(i + 1))
            .map(|t| expand_home(clean_path_token(t)))
    };

    IntentParams {
        source_dir: path_after(source_idx),
        dest_dir: path_after(dest_idx),
        criterion,
        recursive,
    }
}

/// Whitespace split that keeps quoted segments together.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Drop sentence punctuation glued to the end of a path.
fn clean_path_token(token: &str) -> &str {
    let trimmed = token.trim_end_matches([',', ';', '!', '?']);
    match trimmed.strip_suffix('.') {
        Some(rest) if !rest.is_empty() && !rest.ends_with(['.', '/']) => rest,
        _ => trimmed,
    }
}

fn expand_home(token: &str) -> PathBuf {
    if token == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(token));
    }

    match (token.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(token),
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
