//! Common transport-layer types shared between the handlers and the compute
//! crate. These structs are the JSON payloads of the summary endpoints, so
//! they carry serde and OpenAPI derives rather than living next to the
//! aggregation logic itself.

mod series;
mod summary;

pub use series::{MonthlyFlow, MonthlyFlowSeries};
pub use summary::{
    AllocationSlice, CardUtilization, CreditSummary, DashboardSummary, PortfolioSummary,
};
