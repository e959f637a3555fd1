mod catalog;
mod html;
mod serve;
mod track;
mod web_assets;

use std::io;

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use catalog::{house_catalog, Catalog};
use track::{ScrollSpy, SectionOffset};

/// Lookahead in rendered lines for the terminal view; the web page uses the
/// 60px equivalent in `track::NAV_LOOKAHEAD`.
const VIEW_LOOKAHEAD: i64 = 2;

#[derive(Subcommand)]
enum Commands {
    /// Serve the menu page over HTTP
    Serve {
        /// Interface address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Starting port number for the HTTP server
        #[arg(long, default_value = "3333")]
        port: u16,
    },
    /// View the menu in the terminal
    View,
    /// Print the rendered HTML page to stdout
    Export,
}

#[derive(Parser)]
#[command(
    name = "cardapio",
    version,
    about = "A restaurant menu page renderer",
    after_help = "INVOCATION FORMS:\n  cardapio serve [OPTIONS]   Serve the menu page over HTTP\n  cardapio view              View the menu in the terminal\n  cardapio export            Print the rendered HTML to stdout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let catalog = house_catalog();

    match cli.command {
        Commands::Serve { bind, port } => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(io::Error::other)?;
            rt.block_on(serve::run_serve(catalog, bind, port))
        }
        Commands::View => {
            eprintln!("[view] TUI viewer dispatched");
            ratatui::run(|terminal| run_view(terminal, &catalog))
        }
        Commands::Export => {
            catalog::validate(&catalog)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
            let page = html::render_page(&catalog)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
            print!("{page}");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal view
// ---------------------------------------------------------------------------

/// The catalog rendered to styled lines, with the line offset of each
/// category section recorded for scroll tracking.
struct RenderedMenu {
    text: Text<'static>,
    sections: Vec<SectionOffset>,
}

fn category_style() -> Style {
    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
}

/// Render the catalog into terminal lines: a heading per category, then one
/// block per item (name and price, description, optional tag badges).
fn render_menu(catalog: &Catalog) -> RenderedMenu {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut sections: Vec<SectionOffset> = Vec::new();

    for (i, category) in catalog.categories.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        sections.push(SectionOffset::new(category.id.clone(), lines.len() as i64));
        lines.push(Line::from(Span::styled(
            format!("── {} ──", category.title),
            category_style(),
        )));
        lines.push(Line::default());

        for item in &category.items {
            lines.push(Line::from(vec![
                Span::styled(
                    item.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(item.price.clone(), Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", item.description),
                Style::default().fg(Color::Gray),
            )));
            if !item.tags.is_empty() {
                let badges = item
                    .tags
                    .iter()
                    .map(|t| format!("[{t}]"))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(Line::from(Span::styled(
                    format!("  {badges}"),
                    Style::default().fg(Color::Cyan),
                )));
            }
            lines.push(Line::default());
        }
    }

    RenderedMenu {
        text: Text::from(lines),
        sections,
    }
}

fn run_view(terminal: &mut DefaultTerminal, catalog: &Catalog) -> io::Result<()> {
    let rendered = render_menu(catalog);
    let total_lines = rendered.text.lines.len();
    let mut scroll_offset: usize = 0;
    let mut spy = ScrollSpy::new(rendered.sections.clone(), VIEW_LOOKAHEAD, 0);

    loop {
        terminal.draw(|frame| {
            ui(frame, catalog, &rendered, scroll_offset, total_lines, spy.active());
        })?;

        let event = event::read()?;

        // Nav row and status bar take one line each.
        let viewport_height = terminal.size()?.height.saturating_sub(2) as usize;
        let max_scroll = total_lines.saturating_sub(viewport_height);
        scroll_offset = scroll_offset.min(max_scroll);

        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),

                KeyCode::Char('j') | KeyCode::Down => {
                    scroll_offset = (scroll_offset + 1).min(max_scroll);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    scroll_offset = scroll_offset.saturating_sub(1);
                }
                KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    scroll_offset = (scroll_offset + viewport_height / 2).min(max_scroll);
                }
                KeyCode::PageDown => {
                    scroll_offset = (scroll_offset + viewport_height / 2).min(max_scroll);
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    scroll_offset = scroll_offset.saturating_sub(viewport_height / 2);
                }
                KeyCode::PageUp => {
                    scroll_offset = scroll_offset.saturating_sub(viewport_height / 2);
                }
                KeyCode::Char('g') | KeyCode::Home => {
                    scroll_offset = 0;
                }
                KeyCode::Char('G') | KeyCode::End => {
                    scroll_offset = max_scroll;
                }

                // Next category
                KeyCode::Char('n') => {
                    if let Some(pos) = rendered
                        .sections
                        .iter()
                        .find(|s| s.top as usize > scroll_offset)
                    {
                        scroll_offset = (pos.top as usize).min(max_scroll);
                    }
                }
                // Previous category
                KeyCode::Char('p') => {
                    if let Some(pos) = rendered
                        .sections
                        .iter()
                        .rev()
                        .find(|s| (s.top as usize) < scroll_offset)
                    {
                        scroll_offset = (pos.top as usize).min(max_scroll);
                    }
                }

                _ => {}
            }

            spy.observe(scroll_offset as i64);
        }
    }
}

fn ui(
    frame: &mut Frame,
    catalog: &Catalog,
    rendered: &RenderedMenu,
    scroll_offset: usize,
    total_lines: usize,
    active: Option<&str>,
) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    // Nav row: one entry per category, the active one highlighted.
    let mut nav_spans: Vec<Span<'static>> = Vec::new();
    for (i, category) in catalog.categories.iter().enumerate() {
        if i > 0 {
            nav_spans.push(Span::raw("  "));
        }
        let style = if active == Some(category.id.as_str()) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        nav_spans.push(Span::styled(format!(" {} ", category.title), style));
    }
    frame.render_widget(Paragraph::new(Line::from(nav_spans)), chunks[0]);

    // Scrolled menu content.
    let widget = Paragraph::new(rendered.text.clone()).scroll((scroll_offset as u16, 0));
    frame.render_widget(widget, chunks[1]);

    // Status bar with scroll position indicator.
    let viewport_height = chunks[1].height as usize;
    let position = if total_lines <= viewport_height {
        "All".to_owned()
    } else if scroll_offset == 0 {
        "Top".to_owned()
    } else if scroll_offset >= total_lines.saturating_sub(viewport_height) {
        "Bot".to_owned()
    } else {
        format!("{}%", (scroll_offset * 100) / total_lines)
    };

    let section_ctx = active
        .and_then(|id| {
            catalog
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| format!(" \u{00A7} {}", c.title))
        })
        .unwrap_or_default();

    let status = format!(
        " Line {}/{} \u{2014} {}{}",
        scroll_offset + 1,
        total_lines,
        position,
        section_ctx,
    );
    let status_bar = Paragraph::new(Span::styled(
        status,
        Style::default().fg(Color::Black).bg(Color::White),
    ))
    .style(Style::default().bg(Color::White));
    frame.render_widget(status_bar, chunks[2]);
}
