use std::sync::Arc;

pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Progress sink that prints to stderr, or `None` when not verbose.
pub fn stderr_progress(verbose: bool) -> Option<ProgressCallback> {
    if verbose {
        Some(Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        None
    }
}
