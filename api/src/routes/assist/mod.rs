pub mod assist_request;
pub mod assist_route;
