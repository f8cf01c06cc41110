pub mod legend;
pub mod map;
pub mod popup;
pub mod station_panel;
