pub mod assessment;
pub mod portfolio;
