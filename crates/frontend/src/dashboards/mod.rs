pub mod campaign;
pub mod health_news;
pub mod homepage;
pub mod monitoring;
pub mod tiktok_cuan;

pub use campaign::CampaignPane;
pub use health_news::HealthNewsPane;
pub use homepage::HomepagePane;
pub use monitoring::MonitoringPane;
pub use tiktok_cuan::TiktokCuanPane;
