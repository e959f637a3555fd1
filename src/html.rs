//! HTML rendering for the menu page.
//!
//! Pure functions of the catalog: re-invoking with the same catalog produces
//! byte-identical output. The generated markup structure is a contract —
//! navigation header, one section per category, item blocks with optional tag
//! badges, and a fixed two-line footer, in that order.

use thiserror::Error;

use crate::catalog::{Catalog, Category, Item};

/// Element id of the render target in the page shell. The menu fragment is
/// mounted into this container; a shell without it is a hard error.
pub const CONTAINER_ID: &str = "menu-items-container";

/// The attribute value carried by the currently active navigation link.
/// Every other link carries the same attribute with an empty value — the
/// attribute is always present, never absent.
pub const CURRENT_MARKER: &str = "page";

/// The two fixed footer notices.
pub const FOOTER_NOTICES: [&str; 2] = [
    "Preços incluem 10% de serviço",
    "Consulte nosso cardápio para mais opções",
];

/// The render target is missing from the page shell. Not recoverable;
/// rendering halts rather than producing partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("render target '#menu-items-container' not found in page shell")]
    ContainerMissing,
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Minimal HTML entity escaping for text content and attribute values.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Fragment builders
// ---------------------------------------------------------------------------

/// One item block: name, description, optional tag badges, price.
///
/// An item with zero tags renders no `item-tags` block at all; with N tags it
/// renders exactly N badges in catalog order.
fn render_item(item: &Item) -> String {
    let name = html_escape(&item.name);
    let description = html_escape(&item.description);
    let price = html_escape(&item.price);

    let tags_html = if item.tags.is_empty() {
        String::new()
    } else {
        let badges: String = item
            .tags
            .iter()
            .map(|tag| format!("<span class=\"item-tag\">{}</span>", html_escape(tag)))
            .collect();
        format!("<div class=\"item-tags\">{badges}</div>\n")
    };

    format!(
        "<article class=\"menu-item\">\n\
<div class=\"item-info\">\n\
<h3 class=\"item-name\">{name}</h3>\n\
<p class=\"item-description\">{description}</p>\n\
{tags_html}\
</div>\n\
<span class=\"item-price\">{price}</span>\n\
</article>\n"
    )
}

/// One labeled section per category, with the heading id the navigation and
/// the scroll script both anchor on.
fn render_category(category: &Category) -> String {
    let id = &category.id;
    let title = html_escape(&category.title);
    let items: String = category.items.iter().map(render_item).collect();

    format!(
        "<section id=\"{id}\" class=\"menu-category\" aria-labelledby=\"{id}-title\">\n\
<h2 id=\"{id}-title\" class=\"category-title\">{title}</h2>\n\
<div class=\"menu-items\">\n\
{items}\
</div>\n\
</section>\n"
    )
}

/// The navigation header: one link per category, anchored to its id.
///
/// The link whose category id equals `active` carries
/// `aria-current="page"`; all others carry `aria-current=""`.
pub fn render_nav(catalog: &Catalog, active: Option<&str>) -> String {
    let mut links = String::new();
    for category in &catalog.categories {
        let marker = if active == Some(category.id.as_str()) {
            CURRENT_MARKER
        } else {
            ""
        };
        links.push_str(&format!(
            "<li><a href=\"#{}\" aria-current=\"{}\">{}</a></li>\n",
            category.id,
            marker,
            html_escape(&category.title),
        ));
    }

    format!(
        "<header class=\"menu-header\">\n\
<nav class=\"menu-nav\" role=\"navigation\" aria-label=\"Categorias do menu\">\n\
<ul>\n\
{links}\
</ul>\n\
</nav>\n\
</header>\n"
    )
}

/// Fixed footer with the two informational notices.
fn render_footer() -> String {
    let notices: String = FOOTER_NOTICES
        .iter()
        .map(|notice| format!("<p>{}</p>\n", html_escape(notice)))
        .collect();
    format!("<footer class=\"menu-footer\">\n{notices}</footer>\n")
}

/// The full menu fragment in fixed order: navigation header, one section per
/// category, footer. No link is marked current at render time; the embedded
/// script marks the initial section once the page loads.
pub fn render_fragment(catalog: &Catalog) -> String {
    let mut out = render_nav(catalog, None);
    for category in &catalog.categories {
        out.push_str(&render_category(category));
    }
    out.push_str(&render_footer());
    out
}

// ---------------------------------------------------------------------------
// Page shell and mounting
// ---------------------------------------------------------------------------

/// The empty render target as it appears in the page shell.
fn empty_container() -> String {
    format!("<div id=\"{CONTAINER_ID}\"></div>")
}

/// The document shell the fragment is mounted into. Contains the (empty)
/// render target, the stylesheet link, and the scroll-navigation script.
fn page_shell() -> String {
    let container = empty_container();

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"pt-BR\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>Cardápio</title>\n\
<link rel=\"stylesheet\" href=\"/assets/cardapio.css\">\n\
</head>\n\
<body>\n\
{container}\n\
<script src=\"/assets/cardapio.js\"></script>\n\
</body>\n\
</html>\n"
    )
}

/// Replace the contents of the render target in `shell` with `fragment`.
///
/// The shell must contain the empty container element exactly as produced by
/// the shell builder; if the render target is absent the whole render fails —
/// there is deliberately no partial-output path.
pub fn mount_fragment(shell: &str, fragment: &str) -> Result<String, MountError> {
    let target = empty_container();
    if !shell.contains(&target) {
        return Err(MountError::ContainerMissing);
    }
    let mounted = format!("<div id=\"{CONTAINER_ID}\">\n{fragment}</div>");
    Ok(shell.replacen(&target, &mounted, 1))
}

/// Render the complete menu page: shell plus mounted fragment.
pub fn render_page(catalog: &Catalog) -> Result<String, MountError> {
    let fragment = render_fragment(catalog);
    let page = mount_fragment(&page_shell(), &fragment)?;
    eprintln!(
        "[render] categories={} bytes={}",
        catalog.categories.len(),
        page.len()
    );
    Ok(page)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
