use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use f2rn_lib::output::F2RN_OUTPUT_VERSION;
use f2rn_lib::progress::stderr_progress;
use f2rn_lib::{
    generate_batch, BatchItem, BatchItemOutput, BatchItemResult, BatchOutput, F2rnError,
    F2rnOutput, GeneratedComponent,
};

use super::{parse_input, write_source, DesignSource};
use crate::cli::{GenerationArgs, OutputFormat};
use crate::formatting::{exit_code_for_batch, render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_batch_config, resolve_generation_options,
    BatchFlagSources,
};

/// Run the batch command.
#[allow(clippy::too_many_arguments)]
pub async fn run_batch(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    inputs: Vec<String>,
    output_dir: PathBuf,
    concurrency: usize,
    delay_ms: u64,
    generation: GenerationArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let options = resolve_generation_options(&generation, false, &config.generation);
    let flags = BatchFlagSources::from_args(raw_args);
    let batch_config = match resolve_batch_config(concurrency, delay_ms, &config.batch, &flags) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&options, Some(&batch_config), config_path.as_deref())
        );
    }

    if let Err(err) = std::fs::create_dir_all(&output_dir) {
        return render_error(F2rnError::Io(err), format);
    }

    let items: Vec<BatchItem> = inputs
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(BatchItem::new)
        .collect();
    if items.is_empty() {
        return render_error(
            F2rnError::Config("batch needs at least one --input".to_string()),
            format,
        );
    }

    let source = DesignSource::new(config.figma.clone());
    let source = &source;
    let report = generate_batch(
        items,
        &options,
        &batch_config,
        move |item| async move {
            let resource = parse_input(&item.input, None)?;
            source.load(&resource).await
        },
        stderr_progress(verbose),
    )
    .await;

    let mut used_names = HashSet::new();
    let items: Vec<BatchItemOutput> = report
        .items
        .into_iter()
        .map(|res| write_item(res, &output_dir, &mut used_names))
        .collect();

    let failed = items.iter().filter(|i| i.error.is_some()).count();
    let body = F2rnOutput::Batch(BatchOutput {
        version: F2RN_OUTPUT_VERSION.to_string(),
        output_dir,
        total: items.len(),
        succeeded: items.len() - failed,
        failed,
        items,
    });
    if let Err(err) = write_output(&body, format) {
        return render_error(F2rnError::Unknown(err.to_string()), format);
    }
    exit_code_for_batch(failed)
}

fn write_item(
    res: BatchItemResult,
    output_dir: &Path,
    used_names: &mut HashSet<String>,
) -> BatchItemOutput {
    let BatchItemResult { item, result } = res;
    let failure = |input: String, err: F2rnError| BatchItemOutput {
        input,
        component_name: None,
        output_path: None,
        test_output_path: None,
        warnings: Vec::new(),
        error: Some(err.to_payload()),
    };

    let generated = match result {
        Ok(generated) => generated,
        Err(err) => return failure(item.input, err),
    };

    let file_stem = unique_file_stem(&generated.spec.name, used_names);
    match write_generated(&generated, output_dir, &file_stem) {
        Ok((output_path, test_output_path)) => BatchItemOutput {
            input: item.input,
            component_name: Some(generated.spec.name),
            output_path: Some(output_path),
            test_output_path,
            warnings: generated.warnings,
            error: None,
        },
        Err(err) => failure(item.input, err),
    }
}

fn write_generated(
    generated: &GeneratedComponent,
    output_dir: &Path,
    file_stem: &str,
) -> Result<(PathBuf, Option<PathBuf>), F2rnError> {
    let output_path = output_dir.join(format!("{file_stem}.tsx"));
    write_source(&output_path, &generated.file_content)?;

    let test_output_path = match &generated.test_content {
        Some(test_content) => {
            let path = output_dir.join(format!("{file_stem}.test.tsx"));
            write_source(&path, test_content)?;
            Some(path)
        }
        None => None,
    };
    Ok((output_path, test_output_path))
}

/// Two inputs resolving to the same component name must not overwrite each other.
fn unique_file_stem(name: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    let mut counter = 1;
    while used.contains(&candidate) {
        candidate = format!("{name}{counter}");
        counter += 1;
    }
    used.insert(candidate.clone());
    candidate
}
