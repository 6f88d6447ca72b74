use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use f2rn_lib::output::F2RN_OUTPUT_VERSION;
use f2rn_lib::{ErrorOutput, F2rnError, F2rnOutput};

use crate::cli::OutputFormat;

/// Write the run summary to stdout in the requested format.
pub fn write_output(body: &F2rnOutput, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Pretty => write_pretty_output(body)?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: F2rnError, format: OutputFormat) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = F2rnOutput::Error(ErrorOutput {
        version: F2RN_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is reserved for fatal errors; partial batch failures use 1.
    ExitCode::from(2)
}

fn write_pretty_output(body: &F2rnOutput) -> io::Result<()> {
    if std::io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
        return Ok(());
    }

    // Pipes keep the JSON shape.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    println!("{content}");
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &F2rnOutput, colorize: bool) -> String {
    match body {
        F2rnOutput::Generate(out) => {
            let mut buf = String::new();
            let header = color("[GENERATE]", "36", colorize);
            writeln!(buf, "{} {}", header, out.component_name).ok();
            writeln!(
                buf,
                "Input: {} (kind: {:?})",
                out.input.value, out.input.kind
            )
            .ok();
            writeln!(
                buf,
                "Layout: {:?}, {} visible children, {} styles",
                out.analysis.layout,
                out.analysis.visible_child_count,
                out.styles.len()
            )
            .ok();
            if !out.analysis.suggested_props.is_empty() {
                writeln!(buf, "Props: {}", out.analysis.suggested_props.join(", ")).ok();
            }
            if let Some(path) = &out.output_path {
                writeln!(buf, "Component: {}", path.display()).ok();
            }
            if let Some(path) = &out.test_output_path {
                writeln!(buf, "Test: {}", path.display()).ok();
            }
            if !out.warnings.is_empty() {
                writeln!(buf, "{}", color("Warnings:", "33", colorize)).ok();
                for warning in &out.warnings {
                    writeln!(buf, "- {}", warning).ok();
                }
            }
            if let Some(code) = &out.code {
                writeln!(buf).ok();
                buf.push_str(code);
            }
            buf
        }
        F2rnOutput::Batch(out) => {
            let mut buf = String::new();
            let header = color("[BATCH]", "34", colorize);
            writeln!(
                buf,
                "{} {}/{} generated into {}",
                header,
                out.succeeded,
                out.total,
                out.output_dir.display()
            )
            .ok();
            for item in &out.items {
                match (&item.error, &item.component_name) {
                    (Some(err), _) => {
                        let status = color("FAIL", "31", colorize);
                        writeln!(buf, "- {} {}: {}", status, item.input, err.message).ok();
                    }
                    (None, name) => {
                        let status = color("OK", "32", colorize);
                        let target = item
                            .output_path
                            .as_ref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default();
                        writeln!(
                            buf,
                            "- {}   {} -> {} {}",
                            status,
                            item.input,
                            name.as_deref().unwrap_or("?"),
                            target
                        )
                        .ok();
                    }
                }
            }
            buf
        }
        F2rnOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Batch runs exit 1 when any item failed.
pub fn exit_code_for_batch(failed: usize) -> ExitCode {
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use f2rn_lib::parser::{LayoutClassification, TargetPrimitive};
    use f2rn_lib::{
        Analysis, BatchItemOutput, BatchOutput, ErrorCategory, ErrorPayload, GenerateOutput,
        ResourceDescriptor, ResourceKind,
    };
    use std::path::PathBuf;

    fn analysis() -> Analysis {
        Analysis {
            component_type: TargetPrimitive::Container,
            has_text: true,
            has_images: false,
            has_interactive_elements: true,
            visible_child_count: 2,
            layout: LayoutClassification::Flex,
            suggested_props: vec!["title".into(), "onPress".into()],
        }
    }

    #[test]
    fn exit_code_for_batch_maps_failures() {
        assert_eq!(exit_code_for_batch(0), ExitCode::SUCCESS);
        assert_eq!(exit_code_for_batch(2), ExitCode::from(1));
    }

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(F2rnError::Config("boom".to_string()), OutputFormat::Json);
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn format_pretty_generate_lists_paths_and_warnings() {
        let output = F2rnOutput::Generate(GenerateOutput {
            version: F2RN_OUTPUT_VERSION.to_string(),
            input: ResourceDescriptor {
                kind: ResourceKind::File,
                value: "button.json".into(),
            },
            component_name: "LoginButton".into(),
            analysis: analysis(),
            styles: vec!["container".into(), "label".into()],
            output_path: Some(PathBuf::from("out/LoginButton.tsx")),
            test_output_path: Some(PathBuf::from("out/LoginButton.test.tsx")),
            code: None,
            test_code: None,
            warnings: vec!["Node \"Icon\" is a vector".into()],
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[GENERATE] LoginButton"));
        assert!(pretty.contains("Input: button.json"));
        assert!(pretty.contains("2 visible children, 2 styles"));
        assert!(pretty.contains("Props: title, onPress"));
        assert!(pretty.contains("Component: out/LoginButton.tsx"));
        assert!(pretty.contains("Test: out/LoginButton.test.tsx"));
        assert!(pretty.contains("Warnings:"));
    }

    #[test]
    fn format_pretty_generate_prints_code_when_not_written() {
        let output = F2rnOutput::Generate(GenerateOutput {
            version: F2RN_OUTPUT_VERSION.to_string(),
            input: ResourceDescriptor {
                kind: ResourceKind::File,
                value: "card.json".into(),
            },
            component_name: "Card".into(),
            analysis: analysis(),
            styles: Vec::new(),
            output_path: None,
            test_output_path: None,
            code: Some("export default Card;\n".into()),
            test_code: None,
            warnings: Vec::new(),
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.ends_with("export default Card;\n"));
        assert!(!pretty.contains("Warnings:"));
    }

    #[test]
    fn format_pretty_batch_marks_failures() {
        let output = F2rnOutput::Batch(BatchOutput {
            version: F2RN_OUTPUT_VERSION.to_string(),
            output_dir: PathBuf::from("out"),
            total: 2,
            succeeded: 1,
            failed: 1,
            items: vec![
                BatchItemOutput {
                    input: "a.json".into(),
                    component_name: Some("Card".into()),
                    output_path: Some(PathBuf::from("out/Card.tsx")),
                    test_output_path: None,
                    warnings: Vec::new(),
                    error: None,
                },
                BatchItemOutput {
                    input: "b.json".into(),
                    component_name: None,
                    output_path: None,
                    test_output_path: None,
                    warnings: Vec::new(),
                    error: Some(ErrorPayload::new(
                        ErrorCategory::Input,
                        "Invalid input: not a node".into(),
                        "fix it",
                    )),
                },
            ],
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[BATCH] 1/2 generated into out"));
        assert!(pretty.contains("OK   a.json -> Card out/Card.tsx"));
        assert!(pretty.contains("FAIL b.json: Invalid input: not a node"));
    }

    #[test]
    fn format_pretty_error_includes_hint() {
        let output = F2rnOutput::Error(ErrorOutput {
            version: F2RN_OUTPUT_VERSION.to_string(),
            message: None,
            error: F2rnError::Config("FIGMA_TOKEN missing".into()).to_payload(),
        });
        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] FIGMA_TOKEN missing"));
        assert!(pretty.contains("Hint: Set FIGMA_TOKEN"));
    }

    #[test]
    fn color_wraps_only_when_enabled() {
        assert_eq!(color("OK", "32", false), "OK");
        assert_eq!(color("OK", "32", true), "\x1b[32mOK\x1b[0m");
    }
}
