use super::{pager_line, Card, PageView};

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_card(card: &Card) -> String {
    format!(
        r#"      <div class="card">
        <img src="{flag}" alt="{alt}"/>
        <div class="card-body">
          <h5>{name}</h5>
          <p><strong>Capital:</strong> {capital}</p>
          <p><strong>Region:</strong> {region}</p>
          <p><strong>Population:</strong> {population}</p>
          <p><strong>Area:</strong> {area}</p>
        </div>
      </div>
"#,
        flag = escape_html(&card.flag_url),
        alt = escape_html(&card.flag_alt),
        name = escape_html(&card.name),
        capital = escape_html(&card.capital),
        region = escape_html(&card.region),
        population = escape_html(&card.population),
        area = escape_html(&card.area),
    )
}

pub fn render_html(view: &PageView) -> Vec<u8> {
    let cards: String = view.cards.iter().map(render_card).collect();
    let cards = if cards.is_empty() {
        "      <p class=\"empty\">No countries to show.</p>\n".to_string()
    } else {
        cards
    };
    let search = if view.search_term.is_empty() {
        String::new()
    } else {
        format!(
            "    <p class=\"search\">Search: {}</p>\n",
            escape_html(&view.search_term)
        )
    };

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Countries</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem auto; max-width: 1140px; color: #212529; }}
    .grid {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }}
    .card {{ border: 1px solid #dee2e6; border-radius: 0.375rem; overflow: hidden; box-shadow: 0 .125rem .25rem rgba(0,0,0,.075); }}
    .card img {{ width: 100%; height: 180px; object-fit: cover; object-position: center; border-bottom: 1px solid #eee; }}
    .card-body {{ padding: 1rem; }}
    .card-body p {{ margin: 0 0 .25rem 0; }}
    .pager {{ margin-top: 1.5rem; text-align: center; font-family: monospace; }}
  </style>
</head>
<body>
  <h3>Countries</h3>
{search}    <div class="grid">
{cards}    </div>
  <div class="pager">{pager}</div>
</body>
</html>
"####,
        search = search,
        cards = cards,
        pager = escape_html(&pager_line(view)),
    );
    html.into_bytes()
}
