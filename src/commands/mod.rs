pub mod chart;
pub mod init;
pub mod locale;
pub mod villages;

pub use chart::ChartOptions;
