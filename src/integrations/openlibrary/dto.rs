// src/integrations/openlibrary/dto.rs
//
// OpenLibrary response shapes, e.g. for GET /isbn/9780141036144.json:
//
// {
//   "key": "/books/OL24226808M",
//   "title": "The God Delusion",
//   "isbn_10": ["0141036141"],
//   "isbn_13": ["9780141036144"],
//   "description": "..." | { "type": "/type/text", "value": "..." },
//   "covers": [123456],
//   "works": [{ "key": "/works/OL82563W" }],
//   "authors": [{ "key": "/authors/OL12345A" }]
// }

use serde::Deserialize;

use crate::domain::{Author, Book, CoverUrl};

/// `description` is a plain string on some records and a `{value}` object on others
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Value { value: String },
    Other(serde_json::Value),
}

impl Description {
    pub fn text(&self) -> Option<&str> {
        match self {
            Description::Text(text) | Description::Value { value: text } => Some(text.as_str()),
            Description::Other(_) => None,
        }
    }
}

/// Reference to another OpenLibrary record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyRef {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditionDto {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "isbn_10", default)]
    pub isbn10: Option<Vec<String>>,
    #[serde(rename = "isbn_13", default)]
    pub isbn13: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub covers: Option<Vec<i64>>,
    #[serde(default)]
    pub works: Option<Vec<KeyRef>>,
    #[serde(default)]
    pub authors: Option<Vec<KeyRef>>,
}

/// Any record fetched by key: authors carry `name`, works carry `title`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenericKeyDto {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl EditionDto {
    pub fn first_isbn10(&self) -> Option<&str> {
        first(&self.isbn10)
    }

    pub fn first_isbn13(&self) -> Option<&str> {
        first(&self.isbn13)
    }

    /// First real cover id; OpenLibrary uses -1 for "no cover"
    pub fn first_cover_id(&self) -> Option<i64> {
        self.covers.as_ref()?.iter().copied().find(|id| *id > 0)
    }

    pub fn work_key(&self) -> Option<&str> {
        self.works
            .as_ref()?
            .iter()
            .find_map(|w| w.key.as_deref())
    }

    pub fn author_keys(&self) -> Vec<&str> {
        self.authors
            .iter()
            .flatten()
            .filter_map(|a| a.key.as_deref())
            .filter(|k| !k.trim().is_empty())
            .collect()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_ref().and_then(Description::text)
    }

    /// Map to a domain book with already-resolved authors
    pub fn to_book(&self, authors: Vec<Author>, cover_base_url: &str) -> Book {
        let isbn10 = self.first_isbn10().map(str::to_string);
        let isbn13 = self.first_isbn13().map(str::to_string);
        let cover = CoverUrl::resolve(
            cover_base_url,
            self.first_cover_id(),
            isbn13.as_deref().or(isbn10.as_deref()),
        );

        Book {
            isbn10,
            isbn13,
            title: self
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "(Untitled)".to_string()),
            authors,
            description: self.description_text().map(str::to_string),
            cover,
            work_key: self.work_key().map(str::to_string),
            edition_key: self.key.clone(),
            owner_name: None,
            owner_id: None,
            for_exchange: false,
            as_gift: false,
        }
    }
}

fn first(values: &Option<Vec<String>>) -> Option<&str> {
    values
        .as_ref()?
        .iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}
