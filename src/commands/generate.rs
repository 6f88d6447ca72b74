use std::path::PathBuf;
use std::process::ExitCode;

use f2rn_lib::output::F2RN_OUTPUT_VERSION;
use f2rn_lib::{generate_component, F2rnError, F2rnOutput, GenerateOutput, ResourceDescriptor};

use super::{parse_input, sibling_test_path, write_source, DesignSource};
use crate::cli::{GenerationArgs, OutputFormat, ResourceType};
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_generation_options};

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    input_type: Option<ResourceType>,
    name: Option<String>,
    output: Option<PathBuf>,
    test_output: Option<PathBuf>,
    generation: GenerationArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let options =
        resolve_generation_options(&generation, test_output.is_some(), &config.generation);
    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&options, None, config_path.as_deref())
        );
        eprintln!("Parsing input resource…");
    }

    let resource = match parse_input(&input, input_type.map(Into::into)) {
        Ok(res) => res,
        Err(err) => return render_error(err, format),
    };

    if verbose {
        eprintln!("Loading design ({:?})…", resource.kind);
    }
    let source = DesignSource::new(config.figma.clone());
    let tree = match source.load(&resource).await {
        Ok(tree) => tree,
        Err(err) => return render_error(err, format),
    };
    if verbose {
        eprintln!("Generating component from {} nodes…", tree.len());
    }

    let generated = match generate_component(&tree, &options, name.as_deref()) {
        Ok(generated) => generated,
        Err(err) => return render_error(F2rnError::from(err), format),
    };
    if verbose {
        for warning in &generated.warnings {
            eprintln!("warning: {warning}");
        }
    }

    let code = match &output {
        Some(path) => {
            if let Err(err) = write_source(path, &generated.file_content) {
                return render_error(err, format);
            }
            None
        }
        None => Some(generated.file_content.clone()),
    };

    let mut test_output_path = None;
    let mut test_code = None;
    if let Some(test_content) = &generated.test_content {
        match test_output.or_else(|| output.as_deref().map(sibling_test_path)) {
            Some(path) => {
                if let Err(err) = write_source(&path, test_content) {
                    return render_error(err, format);
                }
                test_output_path = Some(path);
            }
            None => test_code = Some(test_content.clone()),
        }
    }

    let body = F2rnOutput::Generate(GenerateOutput {
        version: F2RN_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor {
            kind: resource.kind,
            value: resource.value,
        },
        component_name: generated.spec.name.clone(),
        analysis: generated.analysis,
        styles: generated.style_names,
        output_path: output,
        test_output_path,
        code,
        test_code,
        warnings: generated.warnings,
    });
    if let Err(err) = write_output(&body, format) {
        return render_error(F2rnError::Unknown(err.to_string()), format);
    }
    ExitCode::SUCCESS
}
