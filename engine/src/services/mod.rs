pub mod dashboard_service;

pub use dashboard_service::{run_refresh_loop, DashboardService, DashboardSnapshot, RefreshReport};
