pub mod console;
pub mod report;

use colored::Colorize;
use serde::Serialize;

use crate::model::Country;
use crate::utils;
use crate::view::ViewModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: String,
    pub area: String,
    pub flag_url: String,
    pub flag_alt: String,
}

impl From<&Country> for Card {
    fn from(c: &Country) -> Self {
        Self {
            name: c.name.clone(),
            capital: c.capital_label().to_string(),
            region: c.region.clone(),
            population: utils::format_thousands(c.population),
            area: format!("{} km²", utils::format_decimal(c.area)),
            flag_url: c.flag_url.clone(),
            flag_alt: c.flag_alt_text().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageView {
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub search_term: String,
    pub has_prev: bool,
    pub has_next: bool,
    pub cards: Vec<Card>,
}

impl PageView {
    pub fn from_view(view: &ViewModel) -> Self {
        let page = view.visible();
        Self {
            page: page.page,
            total_pages: page.total_pages,
            filtered_count: view.filtered_count(),
            search_term: view.search_term().to_string(),
            has_prev: view.has_prev(),
            has_next: view.has_next(),
            cards: page.items.iter().map(|c| Card::from(*c)).collect(),
        }
    }
}

pub fn render(view: &PageView, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => render_html(view),
    }
}

fn format_card(card: &Card) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", card.name.bold().white()));
    out.push_str(&format!("  {:<11} {}\n", "Capital:".bold(), card.capital));
    out.push_str(&format!("  {:<11} {}\n", "Region:".bold(), card.region));
    out.push_str(&format!("  {:<11} {}\n", "Population:".bold(), card.population));
    out.push_str(&format!("  {:<11} {}\n", "Area:".bold(), card.area));
    out.push_str(&format!("  {:<11} {}\n", "Flag:".bold(), card.flag_url.blue()));
    out
}

pub fn pager_line(view: &PageView) -> String {
    let prev = if view.has_prev { "< prev" } else { "      " };
    let next = if view.has_next { "next >" } else { "      " };
    format!(
        "{}  Page {} of {} ({} results)  {}",
        prev, view.page, view.total_pages, view.filtered_count, next
    )
}

pub fn render_text(view: &PageView) -> Vec<u8> {
    let mut out = String::new();
    if !view.search_term.is_empty() {
        out.push_str(&format!(":: Search    : {}\n\n", view.search_term));
    }
    if view.cards.is_empty() {
        out.push_str("No countries to show.\n");
    }
    for card in view.cards.iter() {
        out.push_str(&format_card(card));
        out.push('\n');
    }
    out.push_str(&pager_line(view));
    out.push('\n');
    out.into_bytes()
}

pub fn render_json(view: &PageView) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(view).unwrap_or_default();
    out.push(b'\n');
    out
}

pub fn render_html(view: &PageView) -> Vec<u8> {
    report::render_html(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> ViewModel {
        let mut vm = ViewModel::new();
        vm.set_records(vec![Country {
            name: "France".to_string(),
            capital: Some("Paris".to_string()),
            region: "Europe".to_string(),
            population: 67391582,
            area: 551695.0,
            flag_url: "https://flagcdn.com/w320/fr.png".to_string(),
            flag_alt: None,
        }]);
        vm
    }

    #[test]
    fn card_applies_display_defaults() {
        let country = Country {
            name: "Svalbard".to_string(),
            capital: None,
            region: "Europe".to_string(),
            population: 2562,
            area: 61399.0,
            flag_url: String::new(),
            flag_alt: None,
        };
        let card = Card::from(&country);
        assert_eq!(card.capital, "N/A");
        assert_eq!(card.flag_alt, "Svalbard");
        assert_eq!(card.population, "2,562");
        assert_eq!(card.area, "61,399 km²");
    }

    #[test]
    fn text_render_shows_cards_and_pager() {
        colored::control::set_override(false);
        let view = PageView::from_view(&sample_view());
        let text = String::from_utf8(render_text(&view)).unwrap();
        assert!(text.contains("France"));
        assert!(text.contains("Paris"));
        assert!(text.contains("67,391,582"));
        assert!(text.contains("Page 1 of 1 (1 results)"));
    }

    #[test]
    fn json_render_is_valid() {
        let view = PageView::from_view(&sample_view());
        let value: serde_json::Value = serde_json::from_slice(&render_json(&view)).unwrap();
        assert_eq!(value["page"], 1);
        assert_eq!(value["cards"][0]["capital"], "Paris");
    }

    #[test]
    fn empty_view_renders_placeholder() {
        let view = PageView::from_view(&ViewModel::new());
        let text = String::from_utf8(render_text(&view)).unwrap();
        assert!(text.contains("No countries to show."));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(infer_format_from_path("page.JSON"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("out.htm"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("out"), None);
        assert_eq!(OutputFormat::parse(" Text "), Some(OutputFormat::Text));
    }
}
