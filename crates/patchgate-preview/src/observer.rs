/// Host-injected sink for batch-level notices.
///
/// The assembler reports per-file skips and batch advisories through this
/// interface instead of printing, so the core stays host-free. Hosts wire it
/// to an output channel, a status bar, or nothing at all.
///
/// # Examples
///
/// ```
/// use patchgate_preview::PreviewObserver;
///
/// struct Collector(std::cell::RefCell<Vec<String>>);
///
/// impl PreviewObserver for Collector {
///     fn on_warn(&self, message: &str) {
///         self.0.borrow_mut().push(message.to_string());
///     }
/// }
/// ```
pub trait PreviewObserver {
    /// Informational notice; safe to ignore.
    fn on_info(&self, _message: &str) {}

    /// A degraded-but-continuing condition, e.g. a file skipped from a batch.
    fn on_warn(&self, _message: &str) {}
}

/// Observer that discards everything. Default for embedded use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl PreviewObserver for NullObserver {}
