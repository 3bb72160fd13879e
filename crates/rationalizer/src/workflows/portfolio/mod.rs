//! Application portfolio: catalogue storage, cached reads, assessment
//! orchestration, reviewer sign-off, and wave planning rollups.

pub mod cache;
pub mod repository;
pub mod router;
pub mod service;
pub mod waves;

#[cfg(test)]
mod tests;

pub use cache::ApplicationCache;
pub use repository::{
    ApplicationLifecycle, ApplicationSummaryView, PortfolioEntry, PortfolioRepository,
    RepositoryError,
};
pub use router::{portfolio_router, SearchParams, StrategyOverride, WaveOverride};
pub use service::{PortfolioService, PortfolioServiceError};
pub use waves::{wave_groups, WaveGroup};
