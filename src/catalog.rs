//! The static menu catalog.
//!
//! The catalog is constructed once at startup, validated, and read-only for
//! the remainder of execution. Items carry no identity beyond their position;
//! category ids double as URL fragments and section anchors.

use serde_json::{json, Value};
use thiserror::Error;

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    /// One-line description shown under the name.
    pub description: String,
    /// Pre-formatted display text (e.g. `R$ 45,00`), not a numeric type.
    pub price: String,
    /// Ordered labels rendered as badges. May be empty.
    pub tags: Vec<String>,
}

/// A named grouping of menu items. Anchors navigation and scroll tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique, URL-fragment-safe anchor id.
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
}

/// The full menu: an ordered sequence of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

/// Catalog invariant violations, reported once at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate category id '{0}'")]
    DuplicateId(String),
    #[error("category id '{0}' is not URL-fragment-safe")]
    UnsafeId(String),
    #[error("category '{0}' has an empty title")]
    EmptyTitle(String),
}

impl Item {
    fn new(name: &str, description: &str, price: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            price: price.to_owned(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

/// The house menu. Content is static configuration, not a data model with a
/// lifecycle; editing this function is how the menu changes.
pub fn house_catalog() -> Catalog {
    Catalog {
        categories: vec![
            Category {
                id: "entradas".to_owned(),
                title: "Entradas".to_owned(),
                items: vec![Item::new(
                    "Sopa de Cebola Gratinada",
                    "Sopa tradicional francesa com queijo gratinado e croutons",
                    "R$ 45,00",
                    &[],
                )],
            },
            Category {
                id: "principais".to_owned(),
                title: "Pratos Principais".to_owned(),
                items: vec![Item::new(
                    "Fondue Savoyarde",
                    "Fondue de queijos com pão e legumes",
                    "R$ 85,00",
                    &["Queijo", "Vegetariano"],
                )],
            },
            Category {
                id: "sobremesas".to_owned(),
                title: "Sobremesas".to_owned(),
                items: vec![Item::new(
                    "Crème Brûlée",
                    "Creme de baunilha com caramelo crocante",
                    "R$ 35,00",
                    &[],
                )],
            },
            Category {
                id: "bebidas".to_owned(),
                title: "Bebidas".to_owned(),
                items: vec![Item::new(
                    "Vinho Tinto",
                    "Vinho tinto francês, taça",
                    "R$ 45,00",
                    &[],
                )],
            },
        ],
    }
}

/// Returns true when `id` is safe to use verbatim as a URL fragment and a
/// DOM element id: non-empty, lowercase ASCII alphanumerics and hyphens,
/// starting with a letter.
fn is_fragment_safe(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Check the catalog invariants: unique fragment-safe ids, non-empty titles.
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen: Vec<&str> = Vec::new();
    for category in &catalog.categories {
        if !is_fragment_safe(&category.id) {
            return Err(CatalogError::UnsafeId(category.id.clone()));
        }
        if seen.contains(&category.id.as_str()) {
            return Err(CatalogError::DuplicateId(category.id.clone()));
        }
        seen.push(&category.id);
        if category.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle(category.id.clone()));
        }
    }
    Ok(())
}

/// JSON projection of the catalog, served at `/catalog.json`.
pub fn catalog_json(catalog: &Catalog) -> Value {
    json!({
        "categories": catalog
            .categories
            .iter()
            .map(|category| {
                json!({
                    "id": category.id,
                    "title": category.title,
                    "items": category
                        .items
                        .iter()
                        .map(|item| {
                            json!({
                                "name": item.name,
                                "description": item.description,
                                "price": item.price,
                                "tags": item.tags,
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    })
}
