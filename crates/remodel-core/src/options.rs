use crate::rule::Rule;

/// Construction options for a [`TransformRegistry`](crate::TransformRegistry).
#[derive(Debug, Clone, Default)]
pub struct RemodelOptions {
    /// When true, `apply` returns the source record untouched.
    pub pass_through: bool,
    /// Fallback rule for output keys registered with "no rule".
    pub default_transformation: Option<Rule>,
}

impl RemodelOptions {
    #[must_use]
    pub fn with_pass_through(mut self, enable: bool) -> Self {
        self.pass_through = enable;
        self
    }

    #[must_use]
    pub fn with_default_transformation(mut self, rule: Rule) -> Self {
        self.default_transformation = Some(rule);
        self
    }
}
