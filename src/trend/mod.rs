//! Historical cost, salary and ROI trends

mod projection;
mod summary;

pub use projection::{predict_trend, project_trend, TrendAnchor, TrendPoint};
pub use summary::{summarize_trends, CategoryTrend, TrendCategory, TrendDirection};
