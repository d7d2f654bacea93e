use countrydex::fetcher::{self, FetchOptions};
use countrydex::output::{self, OutputFormat, PageView};
use countrydex::view::ViewModel;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let countries = fetcher::fetch_countries(&FetchOptions::default()).await?;

    let mut view = ViewModel::new();
    view.set_records(countries);
    view.set_search_term("europe");
    view.next_page();

    println!("Matching: {}", view.filtered_count());
    println!("Pages: {}", view.total_pages());
    let rendered = output::render(&PageView::from_view(&view), OutputFormat::Text);
    print!("{}", String::from_utf8_lossy(&rendered));

    Ok(())
}
