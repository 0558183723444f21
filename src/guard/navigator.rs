//! Navigator abstraction.
//!
//! The navigator is the host's router: it knows where the visitor is and performs
//! location changes. The guard only ever calls these two methods.

/// Trait implemented by the host's navigation component.
pub trait Navigator {
    /// The path the visitor is currently on.
    fn current_location(&self) -> String;

    /// Moves the visitor to `path`.
    fn navigate(&mut self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn current_location(&self) -> String {
        (**self).current_location()
    }

    fn navigate(&mut self, path: &str) {
        (**self).navigate(path)
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn current_location(&self) -> String {
        (**self).current_location()
    }

    fn navigate(&mut self, path: &str) {
        (**self).navigate(path)
    }
}

/// A navigator that records every `navigate` call.
///
/// By default it follows navigations like a real router; `pinned` keeps the
/// location fixed so repeated evaluations see identical inputs.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    location: String,
    follow: bool,
    /// Every path passed to `navigate`, oldest first.
    pub calls: Vec<String>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingNavigator {
    /// Starts at `location` and follows navigations.
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            follow: true,
            calls: Vec::new(),
        }
    }

    /// Starts at `location` and stays there whatever `navigate` is called with.
    pub fn pinned(location: impl Into<String>) -> Self {
        Self {
            follow: false,
            ..Self::at(location)
        }
    }

    /// Simulates the visitor moving on their own (link click, back button).
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Navigator for RecordingNavigator {
    fn current_location(&self) -> String {
        self.location.clone()
    }

    fn navigate(&mut self, path: &str) {
        self.calls.push(path.to_string());
        if self.follow {
            self.location = path.to_string();
        }
    }
}
