// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB/crypto adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases, auth policies
// - domain: core models and input rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
