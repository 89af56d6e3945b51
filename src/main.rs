mod ai;
mod app;
mod config;
mod constants;
mod credentials;
mod input;
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::{GenerationRequest, MODELS, WRITING_STYLES, display_text};
use crate::app::{App, build_dispatcher};
use crate::config::Config;
use crate::credentials::{CredentialStore, Secret};

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,riposte=debug"));

    // Try to create a log file in the config directory
    let log_file = Config::log_path().ok().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .ok()
    });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"riposte - Draft email replies with AI models

Usage: riposte [command]

Commands:
    (none)      Start the reply drafter
    generate    Draft a reply without the UI
                  --model <label> --style <label> [--file <path>]
                  Reads the email from the file, or stdin when omitted
    models      List available models
    styles      List writing styles
    setup       Store API credentials
    help        Show this help message

Credentials are read from OPENROUTER_API_KEY, AWS_ACCESS_KEY_ID,
AWS_SECRET_ACCESS_KEY and AWS_SESSION_TOKEN before the system keyring.

Configuration file: ~/.config/riposte/config.toml
"#
    );
}

/// Arguments of the `generate` command
#[derive(Debug, PartialEq, Eq)]
struct GenerateArgs {
    model: String,
    style: String,
    file: Option<PathBuf>,
}

fn parse_generate_args(args: &[String]) -> Result<GenerateArgs> {
    let mut model = None;
    let mut style = None;
    let mut file = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let slot = match flag.as_str() {
            "--model" | "-m" => &mut model,
            "--style" | "-s" => &mut style,
            "--file" | "-f" => &mut file,
            other => anyhow::bail!("Unknown option: {}", other),
        };
        let value = iter
            .next()
            .with_context(|| format!("Missing value for {}", flag))?;
        *slot = Some(value.clone());
    }

    Ok(GenerateArgs {
        model: model.context("--model is required")?,
        style: style.context("--style is required")?,
        file: file.map(PathBuf::from),
    })
}

async fn run_generate(args: &[String]) -> Result<()> {
    let args = parse_generate_args(args)?;

    let email = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    let config = Config::load()?;
    let dispatcher = build_dispatcher(&config, &CredentialStore::new());
    let request = GenerationRequest::new(email, args.model, args.style);

    let result = dispatcher.generate_response(&request).await;
    println!("{}", display_text(&result));

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_models() {
    for model in MODELS {
        println!("{:<26} {}", model.label, model.provider);
    }
}

fn print_styles() {
    for style in WRITING_STYLES {
        println!("{:<14} {}", style.label, style.instruction);
    }
}

async fn run_setup() -> Result<()> {
    use std::io::{self, Write};

    println!("Riposte Setup");
    println!("=============\n");
    println!("Leave a field blank to keep the current value, or enter - to remove it.\n");

    let store = CredentialStore::new();

    for secret in Secret::ALL {
        let configured = store.get(secret).is_some();
        print!(
            "{}{}: ",
            secret.description(),
            if configured { " [configured]" } else { "" }
        );
        io::stdout().flush()?;
        let value = read_secret()?;
        println!();

        match value.as_str() {
            "" => continue,
            "-" => {
                store.delete(secret);
                println!("Removed {}.", secret.description());
                continue;
            }
            _ => {}
        }
        store
            .set(secret, &value)
            .with_context(|| format!("Failed to store {}", secret.description()))?;
        println!("Stored {}.", secret.description());
    }

    let mut config = Config::load()?;
    print!(
        "AWS region for Bedrock [{}]: ",
        config.bedrock.resolve_region()
    );
    io::stdout().flush()?;
    let mut region = String::new();
    io::stdin().read_line(&mut region)?;
    let region = region.trim();
    if !region.is_empty() {
        config.bedrock.region = Some(region.to_string());
    }

    let config_path = Config::config_path()?;
    if !region.is_empty() || !config_path.exists() {
        Config::ensure_dirs()?;
        config.save()?;
        println!("Configuration saved to {}", config_path.display());
    }

    println!("\n{}", store.debug_info());

    if store.openrouter_api_key().is_none() && store.aws_credentials().is_none() {
        eprintln!("Warning: no provider credentials are configured.");
    }

    println!("\nSetup complete! Run 'riposte' to start.");
    Ok(())
}

fn read_secret() -> Result<String> {
    use std::io;

    // Disable echo
    let _guard = DisableEcho::new()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

struct DisableEcho {
    #[cfg(unix)]
    original: libc::termios,
}

impl DisableEcho {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use std::mem::MaybeUninit;
        use std::os::unix::io::AsRawFd;

        let fd = std::io::stdin().as_raw_fd();
        let mut termios = MaybeUninit::<libc::termios>::uninit();

        unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                anyhow::bail!("Failed to get terminal attributes");
            }
            let original = termios.assume_init();
            let mut new = original;
            new.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &new) != 0 {
                anyhow::bail!("Failed to set terminal attributes");
            }
            Ok(Self { original })
        }
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for DisableEcho {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;
        let fd = std::io::stdin().as_raw_fd();
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup().await,
        Some("models") => {
            print_models();
            Ok(())
        }
        Some("styles") => {
            print_styles();
            Ok(())
        }
        Some("generate") => {
            setup_logging();
            run_generate(&args[2..]).await
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            // The log file lives in the config directory
            Config::ensure_dirs()?;
            setup_logging();

            let config = Config::load()?;

            // Initialize theme from config
            crate::ui::theme::init_theme(config.ui.theme);

            let mut app = App::new(config, &CredentialStore::new());
            app.run().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_generate_args() {
        let parsed = parse_generate_args(&args(&[
            "--model",
            "DeepSeek V3",
            "--style",
            "Concise",
            "--file",
            "mail.txt",
        ]))
        .unwrap();
        assert_eq!(
            parsed,
            GenerateArgs {
                model: "DeepSeek V3".to_string(),
                style: "Concise".to_string(),
                file: Some(PathBuf::from("mail.txt")),
            }
        );

        let short = parse_generate_args(&args(&["-s", "Friendly", "-m", "Moonlight 16B"])).unwrap();
        assert_eq!(short.model, "Moonlight 16B");
        assert_eq!(short.file, None);
    }

    #[test]
    fn test_parse_generate_args_errors() {
        assert!(parse_generate_args(&args(&["--style", "Concise"])).is_err());
        assert!(parse_generate_args(&args(&["--model"])).is_err());
        assert!(parse_generate_args(&args(&["--tone", "x"])).is_err());
    }
}
