use serde::{Deserialize, Serialize};

/// A formula to ensure plus flags that only apply when installing or
/// upgrading it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRequest {
    pub name: String,
    pub extra_args: Vec<String>,
}

impl PackageRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_extra_args<I, S>(name: impl Into<String>, extra_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            extra_args: extra_args.into_iter().map(Into::into).collect(),
        }
    }

    /// `name` followed by the extra args, as passed to `brew install`/`upgrade`.
    pub fn install_args(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.extra_args.iter().cloned())
            .collect()
    }
}
