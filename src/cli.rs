use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info};

use crate::config::{OutputFormat, ToolConfig, DEFAULT_CONFIG_FILE};
use crate::protocol::VarintError;
use crate::report::{DecodeReport, EncodeReport, InspectReport};
use crate::utils::io::{read_lines, write_all};
use crate::utils::varint::DecodeMode;

#[derive(Parser, Debug)]
#[command(name = "protovarint")]
#[command(about = "Protobuf-style varint encoder and decoder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Reject bytes after the terminating byte")]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode unsigned integers (one per stdin line if none given)
    Encode {
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// Decode hex byte sequences (one per stdin line if none given)
    Decode { inputs: Vec<String> },
    /// Show the bit layout of a value
    Inspect {
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Write the default configuration file
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

impl Cli {
    /// Flags win over the config file
    pub fn apply_overrides(&self, config: &mut ToolConfig) {
        if self.json {
            config.output = OutputFormat::Json;
        }
        if self.strict {
            config.decode_mode = DecodeMode::Strict;
        }
    }
}

pub async fn run(cli: Cli, config: ToolConfig) -> Result<()> {
    match cli.command {
        Commands::Encode { values } => {
            let inputs = collect_inputs(values, tokio::io::stdin()).await?;
            let mut stdout = tokio::io::stdout();
            process(&inputs, config.output, &mut stdout, EncodeReport::from_input).await
        }
        Commands::Decode { inputs } => {
            let inputs = collect_inputs(inputs, tokio::io::stdin()).await?;
            let mode = config.decode_mode;
            debug!("Decoding {} inputs in {:?} mode", inputs.len(), mode);
            let mut stdout = tokio::io::stdout();
            process(&inputs, config.output, &mut stdout, |input| {
                DecodeReport::from_input(input, mode)
            })
            .await
        }
        Commands::Inspect { value } => {
            let inputs = vec![value];
            let mut stdout = tokio::io::stdout();
            process(&inputs, config.output, &mut stdout, InspectReport::from_input).await
        }
        Commands::GenerateConfig { output } => {
            ToolConfig::default().save(&output)?;
            info!("Wrote default configuration to {}", output);
            Ok(())
        }
    }
}

/// Command-line inputs, or one per line of `fallback` when there are none
async fn collect_inputs<R: AsyncRead + Unpin>(
    args: Vec<String>,
    fallback: R,
) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    debug!("No inputs on the command line, reading stdin");
    Ok(read_lines(fallback).await?)
}

/// Run `op` on every input and write one line each; fails afterwards if any input failed
async fn process<T, F, W>(
    inputs: &[String],
    format: OutputFormat,
    out: &mut W,
    op: F,
) -> Result<()>
where
    T: Serialize + fmt::Display,
    F: Fn(&str) -> crate::protocol::Result<T>,
    W: AsyncWrite + Unpin,
{
    let mut failed = 0usize;

    for input in inputs {
        let outcome = op(input);
        if let Err(e) = &outcome {
            error!("{}: {}", input, e);
            failed += 1;
        }

        let mut line = render(input, &outcome, format)?;
        line.push('\n');
        write_all(&mut *out, line.as_bytes()).await?;
    }

    if failed > 0 {
        anyhow::bail!("{} of {} inputs failed", failed, inputs.len());
    }
    Ok(())
}

fn render<T: Serialize + fmt::Display>(
    input: &str,
    outcome: &std::result::Result<T, VarintError>,
    format: OutputFormat,
) -> Result<String> {
    let line = match (format, outcome) {
        (OutputFormat::Json, Ok(report)) => serde_json::to_string(report)?,
        (OutputFormat::Json, Err(e)) => {
            serde_json::json!({"input": input, "error": e.to_string()}).to_string()
        }
        (OutputFormat::Text, Ok(report)) => report.to_string(),
        (OutputFormat::Text, Err(e)) => format!("❌ {}: {}", input, e),
    };
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Malformed;

    #[test]
    fn parses_encode_values() {
        let cli = Cli::try_parse_from(["protovarint", "encode", "150", "0x7f"]).unwrap();
        match cli.command {
            Commands::Encode { values } => assert_eq!(values, vec!["150", "0x7f"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["protovarint", "decode", "9601", "--strict", "--json"]).unwrap();
        let mut config = ToolConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.decode_mode, DecodeMode::Strict);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["protovarint", "inspect", "1"]).unwrap();
        let mut config = ToolConfig {
            decode_mode: DecodeMode::Strict,
            ..ToolConfig::default()
        };
        cli.apply_overrides(&mut config);
        assert_eq!(config.decode_mode, DecodeMode::Strict);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn generate_config_default_path() {
        let cli = Cli::try_parse_from(["protovarint", "generate-config"]).unwrap();
        match cli.command {
            Commands::GenerateConfig { output } => assert_eq!(output, DEFAULT_CONFIG_FILE),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn negative_values_reach_the_parser() {
        let cli = Cli::try_parse_from(["protovarint", "encode", "-1"]).unwrap();
        match cli.command {
            Commands::Encode { values } => {
                assert!(matches!(
                    EncodeReport::from_input(&values[0]),
                    Err(VarintError::InvalidInput(_))
                ));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn inspect_requires_value() {
        assert!(Cli::try_parse_from(["protovarint", "inspect"]).is_err());
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn failed_input_does_not_stop_the_rest() {
        let inputs = strings(&["150", "-1", "0x7f"]);
        let mut out: Vec<u8> = Vec::new();

        let result =
            process(&inputs, OutputFormat::Text, &mut out, EncodeReport::from_input).await;

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "150 -> 96 01 (10010110 00000001)");
        assert_eq!(lines[1], "❌ -1: invalid input: negative value \"-1\"");
        assert_eq!(lines[2], "127 -> 7f (01111111)");

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 inputs failed");
    }

    #[tokio::test]
    async fn all_inputs_ok_in_json() {
        let inputs = strings(&["96 01 ff", "00"]);
        let mut out: Vec<u8> = Vec::new();

        process(&inputs, OutputFormat::Json, &mut out, |input| {
            DecodeReport::from_input(input, DecodeMode::Prefix)
        })
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["value"], 150);
        assert_eq!(values[0]["trailing"], 1);
        assert_eq!(values[1]["value"], 0);
    }

    #[tokio::test]
    async fn strict_mode_failure_is_reported() {
        let inputs = strings(&["96 01 ff"]);
        let mut out: Vec<u8> = Vec::new();

        let result = process(&inputs, OutputFormat::Text, &mut out, |input| {
            DecodeReport::from_input(input, DecodeMode::Strict)
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "1 of 1 inputs failed");
        assert!(String::from_utf8(out).unwrap().starts_with("❌ 96 01 ff: malformed encoding"));
    }

    #[tokio::test]
    async fn arguments_win_over_stdin() {
        let stdin: &[u8] = b"999\n";
        let inputs = collect_inputs(strings(&["150"]), stdin).await.unwrap();
        assert_eq!(inputs, vec!["150"]);
    }

    #[tokio::test]
    async fn stdin_lines_used_without_arguments() {
        let stdin: &[u8] = b"150\n\n0x7f\n";
        let inputs = collect_inputs(Vec::new(), stdin).await.unwrap();
        assert_eq!(inputs, vec!["150", "0x7f"]);
    }

    #[test]
    fn render_text_and_json() {
        let ok = EncodeReport::from_input("150");
        assert_eq!(
            render("150", &ok, OutputFormat::Text).unwrap(),
            "150 -> 96 01 (10010110 00000001)"
        );

        let err: std::result::Result<EncodeReport, VarintError> =
            Err(VarintError::MalformedEncoding(Malformed::Empty));
        let json: serde_json::Value =
            serde_json::from_str(&render("", &err, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["error"], "malformed encoding: empty input");
        assert_eq!(json["input"], "");
    }
}
