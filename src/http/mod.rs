pub mod extract;
pub mod params;
pub mod routes;
pub mod routing;
pub mod types;
