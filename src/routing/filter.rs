//! Filter contract for the gateway pipeline.

use async_trait::async_trait;

use crate::context::RequestContext;

/// Pipeline phase a filter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Pre,
    Route,
    Post,
}

impl FilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Pre => "pre",
            FilterType::Route => "route",
            FilterType::Post => "post",
        }
    }
}

/// A unit of the request pipeline.
///
/// The chain scheduler lives outside this crate; filters only declare
/// where they belong and when they apply.
#[async_trait]
pub trait Filter: Send + Sync {
    fn filter_type(&self) -> FilterType;

    /// Position within the phase; lower runs earlier.
    fn filter_order(&self) -> i32;

    /// Whether this filter applies to the request in `ctx`.
    fn should_filter(&self, ctx: &RequestContext) -> bool;

    /// Execute the filter. Outcomes are written into `ctx`; nothing
    /// propagates past the filter boundary.
    async fn run(&self, ctx: &mut RequestContext);
}
