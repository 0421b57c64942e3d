//! Deprecation-logging decorator over the layout convention.
//!
//! The convention object itself is a plain bag of directory names; the
//! nagging wrapper forwards every call and fires a notification hook so
//! hosts can steer users off the deprecated surface. Notifications are
//! informational and never fatal.

/// Directory-name conventions consulted by distribution consumers.
pub trait LayoutConvention {
    fn dists_dir_name(&self) -> &str;
    fn set_dists_dir_name(&mut self, name: String);
    fn libs_dir_name(&self) -> &str;
    fn set_libs_dir_name(&mut self, name: String);
}

/// Hook invoked when a deprecated surface is touched.
pub trait DeprecationNotifier {
    fn nag(&self, what: &str);
}

/// Default directory names.
#[derive(Debug, Clone)]
pub struct DefaultLayoutConvention {
    dists_dir_name: String,
    libs_dir_name: String,
}

impl Default for DefaultLayoutConvention {
    fn default() -> Self {
        Self {
            dists_dir_name: "distributions".to_string(),
            libs_dir_name: "libs".to_string(),
        }
    }
}

impl LayoutConvention for DefaultLayoutConvention {
    fn dists_dir_name(&self) -> &str {
        &self.dists_dir_name
    }

    fn set_dists_dir_name(&mut self, name: String) {
        self.dists_dir_name = name;
    }

    fn libs_dir_name(&self) -> &str {
        &self.libs_dir_name
    }

    fn set_libs_dir_name(&mut self, name: String) {
        self.libs_dir_name = name;
    }
}

/// Forwarding wrapper that reports a deprecation on every call.
pub struct NaggingLayoutConvention<C, N> {
    delegate: C,
    notifier: N,
}

impl<C, N> NaggingLayoutConvention<C, N> {
    pub fn new(delegate: C, notifier: N) -> Self {
        Self { delegate, notifier }
    }

    pub fn into_inner(self) -> C {
        self.delegate
    }
}

impl<C: LayoutConvention, N: DeprecationNotifier> LayoutConvention
    for NaggingLayoutConvention<C, N>
{
    fn dists_dir_name(&self) -> &str {
        self.notifier.nag("dists_dir_name");
        self.delegate.dists_dir_name()
    }

    fn set_dists_dir_name(&mut self, name: String) {
        self.notifier.nag("set_dists_dir_name");
        self.delegate.set_dists_dir_name(name);
    }

    fn libs_dir_name(&self) -> &str {
        self.notifier.nag("libs_dir_name");
        self.delegate.libs_dir_name()
    }

    fn set_libs_dir_name(&mut self, name: String) {
        self.notifier.nag("set_libs_dir_name");
        self.delegate.set_libs_dir_name(name);
    }
}
