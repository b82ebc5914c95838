use serde::Deserialize;
use log::debug;
use crate::model::Item;

/// Matching rules shared by every launcher mode.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchPolicy {
    /// Also look at the program name, so "soffice" finds LibreOffice.
    #[serde(default = "default_true")]
    pub match_command: bool,
    /// A query with a space means "this exact name", e.g. "gimp ".
    /// Off by default: spaces are then plain characters of the substring.
    #[serde(default)]
    pub exact_on_space: bool,
    /// Punctuation accepted in queries besides letters, digits and space.
    #[serde(default = "default_extra_chars")]
    pub extra_chars: String,
}

fn default_true() -> bool { true }
fn default_extra_chars() -> String { "-+_.".to_string() }

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            match_command: default_true(),
            exact_on_space: false,
            extra_chars: default_extra_chars(),
        }
    }
}

impl SearchPolicy {
    /// Whether typing `c` extends the query.
    pub fn accepts(&self, c: char) -> bool {
        c.is_alphanumeric() || c == ' ' || self.extra_chars.contains(c)
    }

    fn is_match(&self, query: &Query, item: &Item) -> bool {
        match query {
            Query::Exact(token) => item.label().to_lowercase() == *token,
            Query::Substring(needle) => {
                item.label().to_lowercase().contains(needle.as_str())
                    || (self.match_command && item.program().to_lowercase().contains(needle.as_str()))
            }
        }
    }

    /// Indices of `candidates` matching `query`, in candidate order.
    ///
    /// An empty query matches everything. Items sharing a label with an earlier match
    /// are left out, so a favourite does not show up twice.
    pub fn filter(&self, query: &str, candidates: &[Item]) -> Vec<usize> {
        if query.is_empty() {
            return (0..candidates.len()).collect();
        }
        let query = self.parse(query);
        let mut matches: Vec<usize> = Vec::new();
        for (index, item) in candidates.iter().enumerate() {
            if !self.is_match(&query, item) {
                continue;
            }
            if matches.iter().any(|&m| candidates[m].label() == item.label()) {
                continue;
            }
            matches.push(index);
        }
        matches
    }

    fn parse(&self, query: &str) -> Query {
        let query = query.to_lowercase();
        if self.exact_on_space && query.contains(' ') {
            let token = query.split_whitespace().next().unwrap_or("").to_string();
            Query::Exact(token)
        } else {
            Query::Substring(query)
        }
    }
}

enum Query {
    Substring(String),
    Exact(String),
}

/// Query being typed and what it currently matches.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub matches: Vec<usize>,
}

impl SearchState {
    /// Appends `c` if the policy allows it. Returns whether the query changed.
    pub fn push(&mut self, c: char, policy: &SearchPolicy) -> bool {
        if !policy.accepts(c) {
            return false;
        }
        self.query.push(c);
        true
    }

    pub fn pop(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.query.is_empty();
        self.query.clear();
        changed
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Re-runs the whole filter; there is no incremental narrowing.
    pub fn refresh(&mut self, policy: &SearchPolicy, candidates: &[Item]) {
        self.matches = policy.filter(&self.query, candidates);
        debug!("Search: query='{}', filtered_count={}", self.query, self.matches.len());
    }

    /// A lone match is pre-selected so Enter launches it directly.
    pub fn preselected(&self) -> Option<usize> {
        match self.matches.as_slice() {
            [only] if self.is_active() => Some(*only),
            _ => None,
        }
    }
}
