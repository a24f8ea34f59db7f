use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub print_commands: bool,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

fn parse_from(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --port".to_string())?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port value: {value}"))?;
                parsed.port = Some(port);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_string())?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--print-commands" => {
                parsed.print_commands = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "Bloodkeeper\n\n\
Usage:\n  bloodkeeper [--port <port>] [--config <path>] [--print-commands]\n\n\
Options:\n  --port <port>      Override the configured port for this run only\n  --config <path>    Read configuration from <path> instead of the default location\n  --print-commands   Print the slash-command definitions as JSON and exit\n  -h, --help         Show this help message\n"
    );
}
