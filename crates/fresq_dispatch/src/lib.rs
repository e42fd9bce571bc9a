pub mod compositor;
pub mod resolver;
pub mod route_service;
