use std::sync::Arc;

/// Events emitted while the session talks to the catalogue API
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The catalogue listing is being fetched or read
    FetchingCatalogue { source: String },

    /// The listing arrived and parsed
    CatalogueLoaded { show_count: usize },

    /// The listing could not be obtained
    CatalogueFailed { error: String },

    /// A show's detail is being fetched for the modal
    FetchingDetail { show_id: String },

    /// A show's detail arrived
    DetailLoaded {
        show_title: String,
        season_count: usize,
        episode_count: usize,
    },

    /// A show's detail could not be obtained
    DetailFailed { show_id: String, error: String },
}

/// Trait for reporting progress events.
///
/// Implementations can use this to drive a spinner, log messages,
/// or collect events in tests.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter;

        reporter.report(ProgressEvent::FetchingCatalogue {
            source: "https://podcast-api.netlify.app".to_string(),
        });

        reporter.report(ProgressEvent::CatalogueLoaded { show_count: 51 });

        reporter.report(ProgressEvent::CatalogueFailed {
            error: "HTTP error 503".to_string(),
        });

        reporter.report(ProgressEvent::FetchingDetail {
            show_id: "10716".to_string(),
        });

        reporter.report(ProgressEvent::DetailLoaded {
            show_title: "Something Was Wrong".to_string(),
            season_count: 14,
            episode_count: 120,
        });

        reporter.report(ProgressEvent::DetailFailed {
            show_id: "10716".to_string(),
            error: "Connection timeout".to_string(),
        });
    }

    #[test]
    fn shared_noop_reporter_is_usable_through_arc() {
        let reporter = NoopReporter::shared();
        reporter.report(ProgressEvent::CatalogueLoaded { show_count: 0 });
    }
}
