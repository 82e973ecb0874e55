mod svg;

use readmap_layout::{
    Canvas, LayoutConfig, RoadmapDocument, Size, ViewportClass, assign_levels,
    delete_book_tracked, layout_roadmap_with_config,
};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "READMAP_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(readmap_layout::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<readmap_layout::Error> for CliError {
    fn from(value: readmap_layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    Levels,
    #[default]
    Layout,
    Delete,
    Svg,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    width: f64,
    height: f64,
    screen: bool,
    viewport: Option<ViewportClass>,
    config: Option<String>,
    delete_id: Option<String>,
    with_removed: bool,
    focus: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct DeleteOut<'a> {
    removed: &'a [String],
    books: &'a [readmap_layout::Book],
}

fn usage() -> &'static str {
    "readmap\n\
\n\
USAGE:\n\
  readmap levels [--pretty] [<path>|-]\n\
  readmap [layout] [--width <w>] [--height <h>] [--screen] [--viewport compact|medium|full] [--config <path>] [--pretty] [--out <path>] [<path>|-]\n\
  readmap delete --id <book-id> [--removed] [--pretty] [--out <path>] [<path>|-]\n\
  readmap svg [--width <w>] [--height <h>] [--screen] [--viewport compact|medium|full] [--config <path>] [--focus <book-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON array of books, or an object with a `books` array.\n\
  - The canvas defaults to 1400x900; --screen treats --width/--height as the window size.\n\
  - --config reads a JSON file of layout overrides; omitted fields keep their defaults.\n\
  - Set READMAP_LOG (e.g. READMAP_LOG=debug) to log to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Layout,
        width: 1400.0,
        height: 900.0,
        ..Default::default()
    };
    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "levels" => args.command = Command::Levels,
            "layout" => args.command = Command::Layout,
            "delete" => args.command = Command::Delete,
            "svg" => args.command = Command::Svg,
            "--pretty" => args.pretty = true,
            "--screen" => args.screen = true,
            "--removed" => args.with_removed = true,
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--viewport" => {
                let Some(class) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport = Some(
                    class
                        .parse::<ViewportClass>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.delete_id = Some(id.clone());
            }
            "--focus" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command == Command::Delete && args.delete_id.is_none() {
        return Err(CliError::Usage(usage()));
    }
    // `--removed` wraps the delete output; it has no meaning elsewhere.
    if args.with_removed && args.command != Command::Delete {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&str>) -> Result<LayoutConfig, CliError> {
    match path {
        None => Ok(LayoutConfig::default()),
        Some(path) => Ok(LayoutConfig::from_json(&std::fs::read_to_string(path)?)?),
    }
}

fn canvas(args: &Args) -> Canvas {
    let size = Size::new(args.width, args.height);
    if args.screen {
        Canvas::from_screen(size)
    } else {
        size
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc = RoadmapDocument::from_json(&text)?;
    tracing::debug!(books = doc.books().len(), command = ?args.command, "loaded roadmap");

    match args.command {
        Command::Levels => {
            let levels = assign_levels(doc.books())?;
            write_json(&levels, args.pretty, args.out.as_deref())
        }
        Command::Layout => {
            let config = load_config(args.config.as_deref())?;
            let roadmap =
                layout_roadmap_with_config(doc.books(), canvas(&args), &config, args.viewport)?;
            if roadmap.overflows() {
                tracing::info!(
                    width = roadmap.content_size.width,
                    height = roadmap.content_size.height,
                    "roadmap is larger than the canvas"
                );
            }
            write_json(&roadmap, args.pretty, args.out.as_deref())
        }
        Command::Delete => {
            let id = args.delete_id.as_deref().unwrap_or_default();
            let deletion = delete_book_tracked(doc.books(), id);
            if deletion.is_noop() {
                tracing::warn!(id, "no book with this id; collection unchanged");
            }
            if args.with_removed {
                let out = DeleteOut {
                    removed: &deletion.removed,
                    books: &deletion.books,
                };
                write_json(&out, args.pretty, args.out.as_deref())
            } else {
                write_json(&deletion.books, args.pretty, args.out.as_deref())
            }
        }
        Command::Svg => {
            let config = load_config(args.config.as_deref())?;
            let roadmap =
                layout_roadmap_with_config(doc.books(), canvas(&args), &config, args.viewport)?;
            let options = svg::SvgOptions {
                title: doc.title().map(str::to_string),
                focus: args.focus.clone(),
            };
            let rendered = svg::render_roadmap_svg(&roadmap, doc.books(), &options);
            write_text(&rendered, args.out.as_deref())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
