use std::path::PathBuf;

use crate::config::SourceKind;

#[derive(Debug, Default)]
pub struct Cli {
    pub config: Option<PathBuf>,    // default: ./config.toml
    pub bind: Option<String>,
    pub max_draw: Option<u32>,
    pub source: Option<SourceKind>,
    pub draw: Option<u32>,          // one-shot: print this draw and exit
    pub recommend: bool,            // one-shot: print the frequency table and exit
    pub verbose: bool,
    pub help: bool,
}

pub fn parse() -> Cli {
    parse_from(std::env::args().skip(1))
}

/// Unknown flags and unparsable values are ignored.
pub fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Cli {
    let mut cli = Cli::default();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                if let Some(p) = it.next() { cli.config = Some(PathBuf::from(p)); }
            }
            "--bind" => {
                if let Some(b) = it.next() { cli.bind = Some(b); }
            }
            "--max-draw" => {
                if let Some(n) = it.next() { cli.max_draw = n.parse().ok(); }
            }
            "--source" => {
                if let Some(s) = it.next() { cli.source = s.parse().ok(); }
            }
            "--draw" => {
                if let Some(n) = it.next() { cli.draw = n.parse().ok(); }
            }
            "--recommend" => cli.recommend = true,
            "--verbose" | "-v" => cli.verbose = true,
            "--help" | "-h" => cli.help = true,
            _ => {}
        }
    }

    cli
}

pub fn print_help() {
    eprintln!(
r#"lotto-stats

Usage:
  Serve the HTTP API:
    lotto-stats [--config config.toml] [--bind ADDR] [--source page|json] [--max-draw N] [-v]

  One-shot:
    lotto-stats --draw N          Print one draw as JSON.
    lotto-stats --recommend       Scan draws 1..max-draw and print the frequency table.

Options:
  --config, -c PATH     Config file (default ./config.toml).
  --bind ADDR           Listen address (default 0.0.0.0:8080).
  --source page|json    Upstream: results page description, or the JSON endpoint.
  --max-draw N          Last draw scanned by /recommendLotto.
                        Default: derived from the current date.
  -v, --verbose         Debug logging (RUST_LOG overrides).
  -h, --help            Show this help.

Notes:
  • Precedence: CLI > environment (LOTTO_BIND, LOTTO_MAX_DRAW) > config.toml > defaults.
  • .env is loaded at startup if present.
"#);
}
