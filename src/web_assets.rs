//! Embedded static web assets for the menu page.
//!
//! Both files are compiled into the binary via `include_str!` so the binary
//! is fully self-contained; no external asset files need to be distributed.

/// Stylesheet for the menu page.
///
/// Loaded from `src/assets/cardapio.css` at compile time.
pub const CSS: &str = include_str!("assets/cardapio.css");

/// Scroll-navigation script for the menu page.
///
/// Marks the navigation link of the current category with
/// `aria-current="page"` (all others get the empty value) on every scroll
/// event and once on load. Loaded from `src/assets/cardapio.js` at compile
/// time.
pub const JS: &str = include_str!("assets/cardapio.js");
