use serde::{Deserialize, Serialize};

/// Cover image URLs in the three sizes the cover proxy serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverUrl {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    pub fn code(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

impl CoverUrl {
    /// Same URL for every size (catalog items carry a single cover link)
    pub fn uniform(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            small: Some(url.clone()),
            medium: Some(url.clone()),
            large: Some(url),
        }
    }

    /// Covers addressed by an OpenLibrary numeric cover id
    pub fn from_cover_id(base_url: &str, cover_id: i64) -> Self {
        Self::build(|size| {
            format!(
                "{}/openlibrary/getCover/{}-{}",
                base_url.trim_end_matches('/'),
                cover_id,
                size.code()
            )
        })
    }

    /// Covers addressed by ISBN
    pub fn from_isbn(base_url: &str, isbn: &str) -> Self {
        Self::build(|size| {
            format!(
                "{}/openlibrary/getIsbnCover/{}-{}",
                base_url.trim_end_matches('/'),
                isbn,
                size.code()
            )
        })
    }

    /// Cover id wins over ISBN; neither yields no cover at all
    pub fn resolve(base_url: &str, cover_id: Option<i64>, isbn: Option<&str>) -> Option<Self> {
        match (cover_id, isbn.map(str::trim).filter(|i| !i.is_empty())) {
            (Some(id), _) => Some(Self::from_cover_id(base_url, id)),
            (None, Some(isbn)) => Some(Self::from_isbn(base_url, isbn)),
            (None, None) => None,
        }
    }

    pub fn get(&self, size: CoverSize) -> Option<&str> {
        match size {
            CoverSize::Small => self.small.as_deref(),
            CoverSize::Medium => self.medium.as_deref(),
            CoverSize::Large => self.large.as_deref(),
        }
    }

    fn build(url_for: impl Fn(CoverSize) -> String) -> Self {
        Self {
            small: Some(url_for(CoverSize::Small)),
            medium: Some(url_for(CoverSize::Medium)),
            large: Some(url_for(CoverSize::Large)),
        }
    }
}
