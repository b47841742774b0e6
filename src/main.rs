mod app;
mod config;
mod error;
mod fileio;
mod input;
mod mode;
mod style;
mod table;
mod theme;
mod ui;

use std::any::Any;
use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{error, info, warn};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, Message};
use config::AppConfig;
use fileio::FileIO;
use theme::{EnvColorScheme, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

struct Args {
    file_path: Option<PathBuf>,
    delimiter: Option<u8>,
    config_path: Option<PathBuf>,
    no_header: bool,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        file_path: None,
        delimiter: None,
        config_path: None,
        no_header: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--delimiter" => {
                if i + 1 < args.len() {
                    parsed.delimiter = Some(parse_delimiter(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --delimiter requires an argument");
                    std::process::exit(1);
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires an argument");
                    std::process::exit(1);
                }
            }
            "--no-header" => {
                parsed.no_header = true;
                i += 1;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
            _ => {
                parsed.file_path = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    parsed
}

/// Parse a delimiter string into a byte
fn parse_delimiter(s: &str) -> u8 {
    match s.to_lowercase().as_str() {
        "comma" | "," => b',',
        "tab" | "\\t" | "\t" => b'\t',
        "semicolon" | ";" => b';',
        "pipe" | "|" => b'|',
        _ if s.len() == 1 => s.as_bytes()[0],
        _ => {
            eprintln!("Invalid delimiter: '{}'. Use comma, tab, semicolon, pipe, or a single character.", s);
            std::process::exit(1);
        }
    }
}

/// Text of a panic payload raised with a literal or a formatted message
fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some(s)
    } else {
        payload.downcast_ref::<String>().map(String::as_str)
    }
}

/// Restore the terminal before the default panic output
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        if let Some(message) = panic_message(info.payload()) {
            error!(message = %message);
        }

        default_hook(info);
    }));
}

/// Send tracing output to a log file; stdout belongs to the terminal UI
fn init_logging(config: &AppConfig) {
    let Some(path) = config.log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!("Could not open log file {}: {}", path.display(), e),
    }
}

fn print_help() {
    eprintln!("tabview - view CSV/TSV files with filtering, sorting, column hiding and light/dark themes");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tabview [OPTIONS] FILE");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -d, --delimiter <DELIM>  Set the field delimiter (comma, tab, semicolon, pipe, or char)");
    eprintln!("    -c, --config <PATH>      Read configuration from PATH");
    eprintln!("    --no-header              Treat the first record as data and name columns A, B, C...");
    eprintln!("    -h, --help               Print this help message");
    eprintln!();
    eprintln!("If no delimiter is specified, it is taken from the config file or the file extension.");
}

fn main() -> io::Result<()> {
    let args = parse_args();

    let config_path = args.config_path.clone().or_else(AppConfig::default_path);
    let config = match &config_path {
        Some(path) => AppConfig::load(path).unwrap_or_else(|e| {
            eprintln!("{}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => AppConfig::default(),
    };

    init_logging(&config);
    info!("tabview started");
    install_panic_hook();

    let Some(file_path) = args.file_path else {
        print_help();
        std::process::exit(1);
    };

    let delimiter = args.delimiter.or_else(|| {
        config.delimiter.and_then(|c| u8::try_from(c).ok())
    });
    let has_header = config.has_header && !args.no_header;
    let file_io = FileIO::new(file_path, delimiter, has_header);

    let load_result = file_io.load_table().map_err(|e| {
        error!(error = %e, "Failed to load table");
        e
    })?;

    let store: Box<dyn PreferenceStore> = match config.preferences_path() {
        Some(path) => Box::new(FilePreferenceStore::new(path)),
        None => {
            warn!("no config directory; theme preference will not persist");
            Box::new(MemoryPreferenceStore::new())
        }
    };

    let mut app = App::new(load_result.table, file_io.file_name(), &config, store, &EnvColorScheme);

    let mut messages: Vec<String> = load_result.warnings;
    messages.push(format!("Delimiter: {}", file_io.delimiter_name()));
    app.message = Some(Message::Info(messages.join("; ")));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_payloads() {
        let literal = panic::catch_unwind(|| panic!("bad row")).unwrap_err();
        assert_eq!(panic_message(&*literal), Some("bad row"));

        let formatted = panic::catch_unwind(|| panic!("bad row {}", 3)).unwrap_err();
        assert_eq!(panic_message(&*formatted), Some("bad row 3"));

        let other = panic::catch_unwind(|| std::panic::panic_any(7u8)).unwrap_err();
        assert_eq!(panic_message(&*other), None);
    }

    #[test]
    fn test_parse_delimiter_names() {
        assert_eq!(parse_delimiter("tab"), b'\t');
        assert_eq!(parse_delimiter("Pipe"), b'|');
        assert_eq!(parse_delimiter(":"), b':');
    }
}
