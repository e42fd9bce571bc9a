pub mod geopoint;
pub mod ngo;
pub mod order;
pub mod route_path;
pub mod stop;
pub mod time_window;
pub mod urgency;
