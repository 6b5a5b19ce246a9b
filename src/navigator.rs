//! Hard navigation side effects.
//!
//! A 401 or a logout ends with a full navigation to the root route. The
//! embedding application decides what that means (reload a page, return to a
//! login screen) by supplying a [`Navigator`].

use parking_lot::Mutex;

/// Receiver of full-page navigations.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn navigate(&self, route: &str) {
        self(route);
    }
}

/// Navigator that only logs. Used when the embedder has no routing of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(route, "Navigation requested");
    }
}

/// Navigator that records every route it is sent to.
#[derive(Debug, Default)]
pub struct RouteRecorder {
    routes: Mutex<Vec<String>>,
}

impl RouteRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes navigated to, oldest first.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for RouteRecorder {
    fn navigate(&self, route: &str) {
        self.routes.lock().push(route.to_owned());
    }
}
