//! Marketplace assistant: send a question, turn the reply into navigable links.

use std::collections::HashSet;
use std::future::Future;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::fetch::ApiClient;

/// Site sections the assistant may point at with a bare path.
const LINKABLE_SECTIONS: [&str; 3] = ["/vehicles/", "/batteries/", "/auctions/"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLink {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub links: Vec<ChatLink>,
}

impl ChatReply {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let links = extract_links(&text);
        Self { text, links }
    }
}

pub trait ChatClient: Send + Sync {
    fn ask(&self, message: &str) -> impl Future<Output = Result<ChatReply, FetchError>> + Send;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(alias = "message", alias = "answer")]
    reply: String,
}

impl ChatClient for ApiClient {
    async fn ask(&self, message: &str) -> Result<ChatReply, FetchError> {
        let request = ChatRequest {
            message: message.trim(),
        };
        let (data, _) = self
            .send_json::<ChatResponse, _>(Method::POST, "chat", &request)
            .await?;
        let reply = ChatReply::new(data.map(|d| d.reply).unwrap_or_default());
        debug!(links = reply.links.len(), "assistant replied");
        Ok(reply)
    }
}

/// Collect markdown links `[label](target)` and bare section paths such as
/// `/vehicles/<id>` from `reply`, in order of appearance, one per target.
pub fn extract_links(reply: &str) -> Vec<ChatLink> {
    let mut found: Vec<(usize, ChatLink)> = Vec::new();
    let mut covered: Vec<(usize, usize)> = Vec::new();

    for (start, end, link) in markdown_links(reply) {
        covered.push((start, end));
        if let Some(link) = link {
            found.push((start, link));
        }
    }

    for (start, path) in bare_paths(reply) {
        if covered.iter().any(|(s, e)| start >= *s && start < *e) {
            continue;
        }
        found.push((
            start,
            ChatLink {
                label: path.to_string(),
                target: path.to_string(),
            },
        ));
    }

    found.sort_by_key(|(start, _)| *start);

    let mut seen = HashSet::new();
    found
        .into_iter()
        .map(|(_, link)| link)
        .filter(|link| seen.insert(link.target.clone()))
        .collect()
}

/// `(start, end, link)` for each `[label](target)`. The link is `None` when
/// the label or target is unusable.
fn markdown_links(text: &str) -> Vec<(usize, usize, Option<ChatLink>)> {
    let mut links = Vec::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find('[').map(|i| cursor + i) {
        let Some(close) = text[open + 1..].find(']').map(|i| open + 1 + i) else {
            break;
        };
        let label = &text[open + 1..close];
        if label.contains('[') || label.contains('\n') {
            cursor = open + 1;
            continue;
        }
        if !text[close + 1..].starts_with('(') {
            cursor = close + 1;
            continue;
        }
        let Some(end) = text[close + 2..].find(')').map(|i| close + 2 + i) else {
            break;
        };
        let target = text[close + 2..end].trim();
        let label = label.trim();
        let usable = !label.is_empty() && !target.is_empty() && !target.contains(char::is_whitespace);
        links.push((
            open,
            end + 1,
            usable.then(|| ChatLink {
                label: label.to_string(),
                target: target.to_string(),
            }),
        ));
        cursor = end + 1;
    }

    links
}

/// `(start, path)` for each `/section/<id>` not glued to a preceding word.
fn bare_paths(text: &str) -> Vec<(usize, &str)> {
    let mut paths = Vec::new();

    for section in LINKABLE_SECTIONS {
        for (start, _) in text.match_indices(section) {
            let glued = text[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '/' || c == '.');
            if glued {
                continue;
            }
            let id_start = start + section.len();
            let id_len = text[id_start..]
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(text.len() - id_start);
            if id_len > 0 {
                paths.push((start, &text[start..id_start + id_len]));
            }
        }
    }

    paths
}
