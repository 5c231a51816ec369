// src/integrations/catalog/dto.rs
//
// Wire shapes of the catalog backend. Field names follow the backend
// (Spanish); Rust names are English with serde renames.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Author, Book, CoverUrl};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserDto {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// The register endpoint answers with a loose string map (`id`, `nombre`, ...)
pub type RegisterUserResponseDto = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginDto {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(rename = "correo", default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddBookDto {
    pub isbn: String,
    #[serde(rename = "correoPropietario")]
    pub owner_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Answer of `POST /libros/add-libro`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookResponseDto {
    #[serde(rename = "codigoBarra", default)]
    pub barcode: Option<String>,
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "autores", default)]
    pub authors: Vec<AuthorDto>,
}

/// `authorNames` arrives either as a JSON list or as one string
/// (`"[\"A\", \"B\"]"` or `"A, B"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AuthorNames {
    List(Vec<String>),
    Text(String),
}

impl AuthorNames {
    pub fn into_names(self) -> Vec<String> {
        match self {
            AuthorNames::List(names) => names
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
            AuthorNames::Text(raw) => parse_author_names(&raw),
        }
    }
}

/// Split a flattened author list: drop one pair of surrounding brackets,
/// split on commas, strip whitespace and double quotes, drop empties.
pub fn parse_author_names(input: &str) -> Vec<String> {
    let mut s = input.trim();
    if s.len() >= 2 && s.starts_with('[') && s.ends_with(']') {
        s = &s[1..s.len() - 1];
    }
    if s.trim().is_empty() {
        return Vec::new();
    }

    s.split(',')
        .map(|part| part.trim().trim_matches('"').trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Boolean that tolerates `"true"`/`"false"`, 0/1 and null
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LenientBool(pub bool);

impl<'de> Deserialize<'de> for LenientBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Number(i64),
            Text(String),
        }

        let value = match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Bool(b)) => b,
            Some(Raw::Number(n)) => n != 0,
            Some(Raw::Text(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "si" | "sí"),
            None => false,
        };
        Ok(LenientBool(value))
    }
}

/// One entry of a book list (`GET /libros/email/{correo}`, `GET /libros`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookItemDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub author_names: Option<AuthorNames>,
    #[serde(default)]
    pub bar_code: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub isbn10: Option<String>,
    #[serde(default)]
    pub isbn13: Option<String>,
    #[serde(default)]
    pub work_key: Option<String>,
    #[serde(default)]
    pub edition_key: Option<String>,
    #[serde(default)]
    pub nombre_usuario: Option<String>,
    #[serde(default)]
    pub correo_propietario: Option<String>,
    #[serde(default)]
    pub para_intercambio: LenientBool,
    #[serde(default)]
    pub para_regalo: LenientBool,
}

impl BookItemDto {
    pub fn into_book(self) -> Book {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let mut isbn10 = non_empty(self.isbn10);
        let mut isbn13 = non_empty(self.isbn13);
        if isbn10.is_none() && isbn13.is_none() {
            // The barcode is the ISBN printed on the back cover
            match non_empty(self.bar_code) {
                Some(code) if code.len() == 10 => isbn10 = Some(code),
                Some(code) => isbn13 = Some(code),
                None => {}
            }
        }

        let authors = self
            .author_names
            .map(AuthorNames::into_names)
            .unwrap_or_default()
            .into_iter()
            .map(Author::new)
            .collect();

        Book {
            isbn10,
            isbn13,
            title: non_empty(self.title)
                .or(non_empty(self.titulo))
                .unwrap_or_default(),
            authors,
            description: non_empty(self.descripcion).or(non_empty(self.description)),
            cover: non_empty(self.cover_url).map(CoverUrl::uniform),
            work_key: non_empty(self.work_key),
            edition_key: non_empty(self.edition_key),
            owner_name: non_empty(self.nombre_usuario).or(non_empty(self.correo_propietario)),
            owner_id: None,
            for_exchange: self.para_intercambio.0,
            as_gift: self.para_regalo.0,
        }
    }
}

/// Book lists come wrapped (`{"libros": [...]}`) or as a bare array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BookListDto {
    Bare(Vec<BookItemDto>),
    Wrapped {
        #[serde(default)]
        libros: Option<Vec<BookItemDto>>,
    },
}

impl BookListDto {
    pub fn into_items(self) -> Vec<BookItemDto> {
        match self {
            BookListDto::Bare(items) => items,
            BookListDto::Wrapped { libros } => libros.unwrap_or_default(),
        }
    }
}
