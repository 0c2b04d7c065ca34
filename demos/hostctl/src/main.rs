use std::process::ExitCode;

use hostlink::prelude::*;
use hostlink::{Codec, JsonCodec, LoginAuthenticator, ReqwestConnector};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: hostctl <status|start|stop> [--json]";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Status,
    Start,
    Stop,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    json: bool,
}

fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut command = None;
    let mut json = false;

    for arg in args {
        match arg.as_ref() {
            "--json" => json = true,
            "status" if command.is_none() => command = Some(Command::Status),
            "start" if command.is_none() => command = Some(Command::Start),
            "stop" if command.is_none() => command = Some(Command::Stop),
            other => return Err(format!("unexpected argument {other:?}")),
        }
    }

    let command = command.ok_or_else(|| "missing command".to_string())?;
    Ok(Args { command, json })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// What a command produced, ready to print.
#[derive(Serialize)]
#[serde(untagged)]
enum Report {
    Status(ServerStatus),
    Control(ControlOutcome),
}

impl Report {
    fn render_text(&self, server_name: &str) -> String {
        match self {
            Report::Status(s) => format!(
                "{server_name} ({}) is {}, {} online, address {}",
                s.id,
                s.state,
                s.online_players,
                s.address()
            ),
            Report::Control(o) if o.accepted => {
                format!("{} request for {server_name} accepted", o.action)
            }
            Report::Control(o) => {
                format!("{} request for {server_name} was not accepted", o.action)
            }
        }
    }

    fn render_json(&self) -> Result<String, hostlink::ProtocolError> {
        let bytes = JsonCodec.encode(self)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

type HttpClient = ServerClient<LoginAuthenticator<ReqwestConnector>>;

async fn execute(client: &HttpClient, command: Command) -> Result<Report, HostlinkError> {
    Ok(match command {
        Command::Status => Report::Status(client.get_status().await?),
        Command::Start => Report::Control(client.start_server().await?),
        Command::Stop => Report::Control(client.stop_server().await?),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let client = ServerClient::from_config(&config);

    let report = match execute(&client, args.command).await {
        Ok(report) => report,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match report.render_json() {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report.render_text(client.server_name()));
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use hostlink::{ControlAction, ServerId};

    use super::*;

    fn sample_status() -> ServerStatus {
        ServerStatus {
            id: ServerId::new("abc123"),
            state: "online".into(),
            online_players: 3,
            host: "mc.example.com".into(),
            port: 25565,
        }
    }

    #[test]
    fn test_parse_args_command_and_flag_in_any_order() {
        assert_eq!(
            parse_args(["--json", "start"]).unwrap(),
            Args {
                command: Command::Start,
                json: true
            }
        );
        assert_eq!(
            parse_args(["status"]).unwrap(),
            Args {
                command: Command::Status,
                json: false
            }
        );
    }

    #[test]
    fn test_parse_args_rejects_missing_and_extra() {
        assert!(parse_args(Vec::<String>::new()).is_err());
        assert!(parse_args(["stop", "start"]).is_err());
        assert!(parse_args(["restart"]).is_err());
    }

    #[test]
    fn test_render_text_status() {
        let text = Report::Status(sample_status()).render_text("Survival");

        assert_eq!(
            text,
            "Survival (abc123) is online, 3 online, address mc.example.com:25565"
        );
    }

    #[test]
    fn test_render_text_rejected_control() {
        let report = Report::Control(ControlOutcome {
            action: ControlAction::Stop,
            accepted: false,
        });

        assert_eq!(
            report.render_text("Survival"),
            "stop request for Survival was not accepted"
        );
    }

    #[test]
    fn test_render_json_status_fields() {
        let json = Report::Status(sample_status()).render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], "abc123");
        assert_eq!(value["online_players"], 3);
        assert_eq!(value["port"], 25565);
    }

    #[test]
    fn test_render_json_control() {
        let report = Report::Control(ControlOutcome {
            action: ControlAction::Start,
            accepted: true,
        });

        assert_eq!(
            report.render_json().unwrap(),
            r#"{"action":"start","accepted":true}"#
        );
    }
}
