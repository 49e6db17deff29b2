pub mod assist;
pub mod health_route;
pub mod page_route;
pub mod system_prompt_route;
