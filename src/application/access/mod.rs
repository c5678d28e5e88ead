use crate::domain::users::user::Role;

// Role hierarchy: each role may act as itself and every role below it.
// Presentation layer decides which role a route requires.

pub fn permitted_roles(role: Role) -> &'static [Role] {
    match role {
        Role::User => &[Role::User],
        Role::Manager => &[Role::Manager, Role::User],
        Role::Admin => &[Role::Admin, Role::Manager, Role::User],
    }
}

/// Whether a user holding `actual` may access something restricted to `required`.
pub fn is_authorized(required: Role, actual: Role) -> bool {
    permitted_roles(actual).contains(&required)
}

/// Roles whose global notifications a user holding `role` receives.
pub fn visible_roles(role: Role) -> Vec<Role> {
    permitted_roles(role).to_vec()
}
