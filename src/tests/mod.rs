use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::controller::{Controller, Event, FetchState};
use crate::fetcher::{self, FetchError, FetchOptions};
use crate::output::console::Console;
use crate::output::PageView;
use crate::view::ViewModel;

const SCENARIO_BODY: &str = r#"[
  {"name":{"common":"France"},"flags":{"png":"https://flagcdn.com/w320/fr.png","alt":"The flag of France"},
   "capital":["Paris"],"population":67391582,"region":"Europe","area":551695.0},
  {"name":{"common":"Germany"},"flags":{"png":"https://flagcdn.com/w320/de.png"},
   "capital":["Berlin"],"population":83240525,"region":"Europe","area":357114.0},
  {"name":{"common":"Israel"},"flags":{"png":"https://flagcdn.com/w320/il.png"},
   "capital":["Jerusalem"],"population":9216900,"region":"Asia","area":20770.0}
]"#;

/// Serves a single canned HTTP response and returns the endpoint URL.
async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut request = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/v3.1/all")
}

fn options(endpoint: String) -> FetchOptions {
    FetchOptions {
        endpoint,
        timeout_seconds: 5,
        proxy: None,
    }
}

fn names(view: &ViewModel) -> Vec<String> {
    view.filtered().iter().map(|c| c.name.clone()).collect()
}

#[test]
fn search_fr_finds_only_france_and_excludes_israel() {
    let mut view = ViewModel::new();
    view.set_records(fetcher::decode_countries(SCENARIO_BODY.as_bytes()).unwrap());
    view.set_search_term("fr");
    assert_eq!(names(&view), vec!["France"]);

    for term in ["", "isr", "israel", "asia", "jerusalem", "e"] {
        view.set_search_term(term);
        assert!(!names(&view).iter().any(|n| n == "Israel"), "term {term:?}");
    }
}

#[test]
fn empty_term_shows_all_but_excluded() {
    let mut view = ViewModel::new();
    view.set_records(fetcher::decode_countries(SCENARIO_BODY.as_bytes()).unwrap());
    view.set_search_term("");
    assert_eq!(names(&view), vec!["France", "Germany"]);
}

#[tokio::test]
async fn fetch_from_server_populates_controller() {
    let endpoint = serve_once("200 OK", SCENARIO_BODY.to_string()).await;
    let mut controller = Controller::new(ViewModel::new(), Console::new(0));
    let (rx, task) = fetcher::spawn_fetch(options(endpoint));
    controller.attach_task(rx, task);
    controller.await_fetch().await;

    assert_eq!(controller.state(), FetchState::Loaded);
    let page = controller.page_view();
    assert_eq!(page.filtered_count, 2);
    assert_eq!(page.cards[0].name, "France");
    assert_eq!(page.cards[1].area, "357,114 km²");
}

#[tokio::test]
async fn server_error_is_reported_as_status() {
    let endpoint = serve_once("500 Internal Server Error", "oops".to_string()).await;
    let err = fetcher::fetch_countries(&options(endpoint)).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn failed_fetch_shows_zero_results() {
    let endpoint = serve_once("503 Service Unavailable", String::new()).await;
    let mut controller = Controller::new(ViewModel::new(), Console::new(0));
    let (rx, task) = fetcher::spawn_fetch(options(endpoint));
    controller.attach_task(rx, task);
    controller.await_fetch().await;

    assert_eq!(controller.state(), FetchState::Failed);
    let page: PageView = controller.page_view();
    assert!(page.cards.is_empty());
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next);
}

#[tokio::test]
async fn paging_through_fetched_records() {
    let body: Vec<String> = (0..20)
        .map(|i| {
            format!(
                r#"{{"name":{{"common":"Land {i}"}},"flags":{{"png":""}},"capital":["City {i}"],"population":{i},"region":"Oceania","area":1.0}}"#
            )
        })
        .collect();
    let endpoint = serve_once("200 OK", format!("[{}]", body.join(","))).await;
    let mut controller = Controller::new(ViewModel::new(), Console::new(0));
    let (rx, task) = fetcher::spawn_fetch(options(endpoint));
    controller.attach_task(rx, task);
    controller.await_fetch().await;

    assert_eq!(controller.view().total_pages(), 3);
    controller.handle(Event::NextPage);
    controller.handle(Event::NextPage);
    controller.handle(Event::NextPage);
    let page = controller.page_view();
    assert_eq!(page.page, 3);
    assert_eq!(page.cards.len(), 2);
    assert_eq!(page.cards[0].name, "Land 18");

    controller.handle(Event::Search("city 1".to_string()));
    assert_eq!(controller.view().page(), 1);
    // "City 1" and "City 10".."City 19"
    assert_eq!(controller.view().filtered_count(), 11);
    assert_eq!(controller.view().total_pages(), 2);
}
