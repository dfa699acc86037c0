use crate::domain::entities::users::roles;

/// 라우트가 요구하는 역할
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredRole(String);

impl RequiredRole {
    /// 관리자 API용 요구 사항 (`staff` 역할)
    pub fn staff() -> Self {
        RequiredRole(roles::STAFF.to_string())
    }

    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        user_roles.contains(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_requirement() {
        let required = RequiredRole::staff();
        let staff_roles = vec!["user".to_string(), "staff".to_string()];
        let superuser_only = vec!["user".to_string(), "superuser".to_string()];

        assert!(required.is_satisfied(&staff_roles));
        assert!(!required.is_satisfied(&superuser_only));
        assert!(!required.is_satisfied(&["user".to_string()]));
    }
}
