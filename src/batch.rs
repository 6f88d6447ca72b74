//! Throttled generation of many components.
//!
//! Items run in chunks of `concurrency`, with `delay` between chunks to
//! stay under Figma's rate limits. Each item builds its own generation
//! context, and a failing item never aborts its siblings.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::error::{F2rnError, Result};
use crate::generator::{generate_component, GeneratedComponent, GenerationOptions};
use crate::progress::ProgressCallback;
use crate::types::DesignTree;

pub const DEFAULT_CONCURRENCY: usize = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub concurrency: usize,
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            delay: DEFAULT_DELAY,
        }
    }
}

/// One component to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Figma URL or file path, echoed back in the result.
    pub input: String,
    pub name: Option<String>,
}

impl BatchItem {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            name: None,
        }
    }
}

#[derive(Debug)]
pub struct BatchItemResult {
    pub item: BatchItem,
    pub result: Result<GeneratedComponent>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Results in input order.
    pub items: Vec<BatchItemResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}

/// Fetch and generate every item.
///
/// `fetch` resolves an item to its design tree; it is the only I/O.
pub async fn generate_batch<F, Fut>(
    items: Vec<BatchItem>,
    options: &GenerationOptions,
    config: &BatchConfig,
    fetch: F,
    progress: Option<ProgressCallback>,
) -> BatchReport
where
    F: Fn(BatchItem) -> Fut,
    Fut: Future<Output = Result<DesignTree>>,
{
    let chunk_size = config.concurrency.max(1);
    let total = items.len();
    let mut report = BatchReport::default();

    for (index, chunk) in items.chunks(chunk_size).enumerate() {
        if index > 0 && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
        if let Some(cb) = &progress {
            let start = index * chunk_size + 1;
            let end = start + chunk.len() - 1;
            cb(&format!("Generating items {start}-{end} of {total}"));
        }

        let runs = chunk.iter().cloned().map(|item| {
            let fetched = fetch(item.clone());
            async move {
                let result = match fetched.await {
                    Ok(tree) => generate_component(&tree, options, item.name.as_deref())
                        .map_err(F2rnError::from),
                    Err(err) => Err(err),
                };
                BatchItemResult { item, result }
            }
        });
        let results = join_all(runs).await;

        if let Some(cb) = &progress {
            for res in &results {
                match &res.result {
                    Ok(generated) => {
                        cb(&format!("  ok   {} -> {}", res.item.input, generated.spec.name))
                    }
                    Err(err) => cb(&format!("  fail {}: {}", res.item.input, err)),
                }
            }
        }
        report.items.extend(results);
    }

    report
}
