pub mod header;
pub mod metrics_panel;
pub mod result_view;
pub mod status_bar;
pub mod timeseries_chart;
pub mod upload_area;
