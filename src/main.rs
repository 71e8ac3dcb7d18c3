mod debug_report;

use debug_report::ansi::Palette;
use healthbot::{Options, Session, SessionConfig, SubmitError, classify_verbose_with};
use std::io::{self, IsTerminal, Read, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_DELAY_MS: u64 = 1000;
const LOG_ENV: &str = "HEALTHBOT_LOG";

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let palette = Palette::new(config.color);

    if config.explain {
        let input = match config.input {
            Some(input) => input,
            None => match read_stdin_input() {
                Ok(input) => input,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            },
        };
        if input.trim().is_empty() {
            eprintln!("error: no input provided\n\n{}", help_text());
            std::process::exit(2);
        }

        let res = classify_verbose_with(&input, &Options { seed: config.seed });
        debug_report::print_classification(&res, &palette);
        return;
    }

    let session_config = SessionConfig {
        reply_delay: Duration::from_millis(config.delay_ms),
        seed: config.seed,
        welcome: config.input.is_none(),
    };
    let mut session = Session::new(session_config);

    let outcome = match config.input {
        Some(input) => ask(&mut session, input).await,
        None => chat(&mut session, &palette).await,
    };
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Answer a single message given on the command line.
async fn ask(session: &mut Session, input: String) -> io::Result<()> {
    if let Err(err) = session.submit(input) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, err));
    }
    session.wait_for_reply().await;
    if let Some(reply) = session.last_message() {
        println!("{}", reply.text);
    }
    Ok(())
}

/// Line-per-turn chat loop over stdin until EOF or `/quit`.
async fn chat(session: &mut Session, palette: &Palette) -> io::Result<()> {
    let interactive = io::stdin().is_terminal();
    let live = io::stdout().is_terminal();

    for message in session.transcript() {
        debug_report::print_message(&message, palette);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        match session.submit(line) {
            Ok(_) => {}
            Err(SubmitError::EmptyInput) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        }
        if !interactive {
            if let Some(message) = session.last_message() {
                debug_report::print_message(&message, palette);
            }
        }

        if live {
            print!("{}", debug_report::typing_indicator(palette));
            io::stdout().flush()?;
        }
        session.wait_for_reply().await;
        if live {
            print!("{}", palette.clear_line());
        }

        if let Some(reply) = session.last_message() {
            debug_report::print_message(&reply, palette);
        }
    }

    Ok(())
}

#[derive(Debug)]
struct CliConfig {
    input: Option<String>,
    delay_ms: u64,
    seed: Option<u64>,
    explain: bool,
    color: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut delay_ms = DEFAULT_DELAY_MS;
    let mut seed: Option<u64> = None;
    let mut explain = false;
    let mut color = io::stdout().is_terminal();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("healthbot {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--explain" => explain = true,
            "--delay-ms" => {
                let value = args.next().ok_or_else(|| "error: --delay-ms expects a value".to_string())?;
                delay_ms = parse_number("--delay-ms", &value)?;
            }
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                seed = Some(parse_number("--seed", &value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--delay-ms=") => {
                delay_ms = parse_number("--delay-ms", arg.trim_start_matches("--delay-ms="))?;
            }
            _ if arg.starts_with("--seed=") => {
                seed = Some(parse_number("--seed", arg.trim_start_matches("--seed="))?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    if let Some(text) = &input {
        if text.trim().is_empty() {
            return Err(format!("error: input is empty\n\n{}", help_text()));
        }
    }

    Ok(CliConfig { input, delay_ms, seed, explain, color })
}

fn parse_number(flag: &str, value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a non-negative integer)"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "healthbot {version}

Rule-based health assistant chat.

Usage:
  healthbot [OPTIONS]                      Chat, one message per line (stdin)
  healthbot [OPTIONS] [--] <message...>    Answer a single message
  healthbot --explain [OPTIONS] <message>  Show how a message is classified

Options:
  -i, --input <text>     Message to answer. If omitted, reads remaining args,
                         or chats over stdin when no args are provided.
  --explain              Print the classification trace instead of replying.
                         Reads the whole of stdin when no message is given.
  --delay-ms <n>         Simulated reply delay in milliseconds.
                         Default: {default_delay}
  --seed <n>             Seed response picks for reproducible output.
  --color                Force ANSI color output.
  --no-color             Disable ANSI color output.
  -h, --help             Show this help message.
  -V, --version          Print version information.

Environment:
  {log_env}          tracing filter, e.g. `debug` (default: warn).

Chat commands:
  /quit                  End the conversation (EOF works too).

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_delay = DEFAULT_DELAY_MS,
        log_env = LOG_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trailing_words_become_the_message() {
        let config = parse_args(args(&["--no-color", "--seed", "7", "I", "have", "a", "fever"])).unwrap();
        assert_eq!(config.input.as_deref(), Some("I have a fever"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.delay_ms, DEFAULT_DELAY_MS);
        assert!(!config.color);
        assert!(!config.explain);
    }

    #[test]
    fn equals_forms_and_double_dash() {
        let config = parse_args(args(&["--delay-ms=0", "--explain", "--", "--not-a-flag"])).unwrap();
        assert_eq!(config.delay_ms, 0);
        assert!(config.explain);
        assert_eq!(config.input.as_deref(), Some("--not-a-flag"));

        let config = parse_args(args(&["--input=hello"])).unwrap();
        assert_eq!(config.input.as_deref(), Some("hello"));
        assert!(parse_args(args(&[])).unwrap().input.is_none());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(args(&["--seed"])).is_err());
        assert!(parse_args(args(&["--delay-ms", "-5"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["-i", "a", "b"])).is_err());
        assert!(parse_args(args(&["--input", "   "])).is_err());
    }
}
