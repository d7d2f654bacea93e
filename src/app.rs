use std::io::IsTerminal;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{parse_event, Controller, Event};
use crate::fetcher::{self, FetchOptions};
use crate::output::console::Console;
use crate::output::{self, OutputFormat};
use crate::view::{ViewModel, PAGE_SIZE};

fn format_kv_line(label: &str, value: &str) -> String {
    format!(":: {:<10}: {}", label, value)
}

#[derive(Clone, Debug)]
pub(crate) struct RunConfig {
    pub(crate) fetch: FetchOptions,
    pub(crate) search: String,
    pub(crate) page: usize,
    pub(crate) page_size: usize,
    pub(crate) interactive: bool,
    pub(crate) output: Option<String>,
    pub(crate) output_format: OutputFormat,
    pub(crate) no_color: bool,
    pub(crate) verbose: u8,
}

pub(crate) fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let interactive = args.interactive || cfg.interactive.unwrap_or(false);

    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fetcher::DEFAULT_ENDPOINT.to_string());
    reqwest::Url::parse(&endpoint).map_err(|e| format!("invalid endpoint '{endpoint}': {e}"))?;

    let timeout = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(fetcher::DEFAULT_TIMEOUT_SECONDS);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let proxy = args
        .proxy
        .or(cfg.proxy)
        .filter(|p| !p.trim().is_empty());

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page_size, expected positive integer".to_string());
    }

    let output_path = if interactive {
        None
    } else {
        args.output
            .or(cfg.output)
            .map(|p| config::expand_tilde_string(&p))
    };
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output_path
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        fetch: FetchOptions {
            endpoint,
            timeout_seconds: timeout,
            proxy,
        },
        search: args.search.unwrap_or_default(),
        page: args.page.unwrap_or(1),
        page_size,
        interactive,
        output: output_path,
        output_format,
        no_color,
        verbose: args.verbose,
    })
}

fn fetch_spinner(endpoint: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !std::io::stderr().is_terminal() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("fetching countries from {endpoint}"));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn write_output(path: &str, rendered: &[u8]) -> Result<(), String> {
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(rendered)
        .await
        .map_err(|e| format!("failed to write output file: {e}"))?;
    Ok(())
}

fn print_page(controller: &Controller, format: OutputFormat) {
    let rendered = output::render(&controller.page_view(), format);
    print!("{}", String::from_utf8_lossy(&rendered));
}

fn print_prompt() {
    eprint!(
        "{} ",
        "[n]ext [p]rev /search [q]uit >".bold().white()
    );
}

fn show_requested_page(controller: &mut Controller, console: &Console, requested: usize) -> usize {
    if requested <= 1 {
        return controller.view().page();
    }
    let shown = controller.go_to_page(requested);
    if shown != requested {
        console.warn(&format!(
            "page {} is out of range, showing page {}",
            requested, shown
        ));
    }
    shown
}

async fn run_interactive(
    controller: &mut Controller,
    console: Console,
    format: OutputFormat,
) -> Result<(), String> {
    print_page(controller, format);
    print_prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        if line.trim().is_empty() {
            print_prompt();
            continue;
        }
        match parse_event(&line) {
            Ok(Event::Quit) => break,
            Ok(event) => {
                controller.handle(event);
                println!();
                print_page(controller, format);
            }
            Err(e) => console.warn(&e),
        }
        print_prompt();
    }
    eprintln!();
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    let console = Console::new(run.verbose);
    console.debug(&format_kv_line("Endpoint", &run.fetch.endpoint));
    console.debug(&format_kv_line("Timeout", &format!("{}s", run.fetch.timeout_seconds)));
    if let Some(proxy) = run.fetch.proxy.as_deref() {
        console.debug(&format_kv_line("Proxy", proxy));
    }

    let mut view = ViewModel::with_page_size(run.page_size);
    view.set_search_term(run.search.clone());
    let mut controller = Controller::new(view, console);

    let (rx, task) = fetcher::spawn_fetch(run.fetch.clone());
    controller.attach_task(rx, task);

    let pb = fetch_spinner(&run.fetch.endpoint);
    controller.await_fetch().await;
    pb.finish_and_clear();

    let summary = controller.view();
    console.info(&format!(
        "{} countries, {} matching",
        summary.records().len(),
        summary.filtered_count()
    ));

    show_requested_page(&mut controller, &console, run.page);

    if run.interactive {
        run_interactive(&mut controller, console, run.output_format).await?;
        controller.teardown();
        return Ok(());
    }

    let rendered = output::render(&controller.page_view(), run.output_format);
    match run.output.as_deref() {
        Some(path) => {
            write_output(path, &rendered).await?;
            console.info(&format!("wrote page {} to {}", controller.view().page(), path));
        }
        None => print!("{}", String::from_utf8_lossy(&rendered)),
    }
    controller.teardown();
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(path) => config::expand_tilde(path),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        config::ensure_default_config_file(&path)?;
        println!("{}", format_kv_line("Config", &path.display().to_string()));
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
