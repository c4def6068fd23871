use serde::Deserialize;

use crate::api::ApiError;

pub type CategoryId = u64;

/// Entry of `GET /categories?count=N`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub id: CategoryId,
}

/// Body of `GET /categories/{id}/clues`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryDetails {
    pub title: String,
    #[serde(default)]
    pub clues: Vec<ClueData>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClueData {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Showing {
    Hidden,
    Question,
    Answer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    pub showing: Showing,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            showing: Showing::Hidden,
        }
    }

    /// Moves one step towards the answer. Returns false once the answer is
    /// already showing.
    pub fn advance(&mut self) -> bool {
        let next = match self.showing {
            Showing::Hidden => Showing::Question,
            Showing::Question => Showing::Answer,
            Showing::Answer => return false,
        };
        self.showing = next;
        true
    }

    pub fn display_text(&self) -> &str {
        match self.showing {
            Showing::Hidden => "?",
            Showing::Question => &self.question,
            Showing::Answer => &self.answer,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub title: String,
    pub clues: Vec<Clue>,
}

impl Category {
    /// Builds a category from the first `clue_count` usable clues. Clues with
    /// a blank question or answer are skipped.
    pub fn from_details(details: CategoryDetails, clue_count: usize) -> Result<Self, ApiError> {
        let mut clues: Vec<Clue> = details
            .clues
            .into_iter()
            .filter_map(|c| {
                let question = clean_text(c.question.as_deref().unwrap_or(""));
                let answer = clean_text(c.answer.as_deref().unwrap_or(""));
                if question.is_empty() || answer.is_empty() {
                    None
                } else {
                    Some(Clue::new(question, answer))
                }
            })
            .collect();

        if clues.len() < clue_count {
            return Err(ApiError::NotEnoughClues {
                wanted: clue_count,
                found: clues.len(),
            });
        }
        clues.truncate(clue_count);

        Ok(Self {
            title: clean_text(&details.title),
            clues,
        })
    }

    pub fn revealed_count(&self) -> usize {
        self.clues
            .iter()
            .filter(|c| c.showing != Showing::Hidden)
            .count()
    }
}

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Strips HTML tags and backslash escapes, decodes the common entities and
/// collapses whitespace. A `<` that does not open a tag is kept as text.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                if let Some(len) = tag_len(rest) {
                    rest = &rest[len..];
                    continue;
                }
            }
            '&' => {
                if let Some((decoded, len)) = entity(rest) {
                    out.push(decoded);
                    rest = &rest[len..];
                    continue;
                }
            }
            '\\' => {
                rest = &rest[1..];
                if let Some(next @ ('\'' | '"' | '\\')) = rest.chars().next() {
                    out.push(next);
                    rest = &rest[1..];
                }
                continue;
            }
            _ => {}
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length of the tag at the start of `s`: `<`, optional `/`, a letter, then
/// everything up to the closing `>`.
fn tag_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('<')?;
    let name = body.strip_prefix('/').unwrap_or(body);
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    s.find('>').map(|end| end + 1)
}

fn entity(s: &str) -> Option<(char, usize)> {
    ENTITIES
        .iter()
        .find(|(name, _)| s.starts_with(name))
        .map(|(name, c)| (*c, name.len()))
}
