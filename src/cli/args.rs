use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "countrydex",
    version,
    about = "paginated, searchable country directory",
    long_about = "Countrydex fetches the REST Countries dataset once, filters it by name, capital or region and shows it nine cards at a time.\n\nExamples:\n  countrydex\n  countrydex -s europe -P 2\n  countrydex -i\n  countrydex -s fr -o page.html\n\nTip: Use --config to persist endpoint and HTTP settings."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json or html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 's',
        long = "q",
        visible_alias = "search",
        value_name = "TERM",
        help_heading = "View",
        help = "Only show countries whose name, capital or region contains TERM (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'P',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "View",
        help = "Page to show (1-based, clamped to the last page)."
    )]
    pub page: Option<usize>,

    #[arg(
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "View",
        help = "Countries per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Browse interactively (n/p to page, /TERM to search, q to quit)."
    )]
    pub interactive: bool,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.countrydex/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file to the --config path (or ~/.countrydex/config.yml) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'e',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Input",
        help = "Country list endpoint."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<usize>,
}
