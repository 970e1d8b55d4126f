use uuid::Uuid;

use crate::features::auth::models::{User, UserRole};
use crate::features::feedback::models::Feedback;

/// What slice of the feedback collection a caller may see.
///
/// Derived once per caller and shared by list, get, and update so the
/// permission checks cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackScope {
    /// dept_head and admin: everything
    All,
    /// officer: records routed to this department. An officer without a
    /// department matches nothing (the empty name never appears on records).
    Department(String),
    /// citizen: own records only; anonymous submissions have no owner and
    /// are never visible through this scope
    Own(Uuid),
}

impl FeedbackScope {
    pub fn for_user(user: &User) -> Self {
        match user.role {
            UserRole::Citizen => FeedbackScope::Own(user.id),
            UserRole::Officer => {
                FeedbackScope::Department(user.department.clone().unwrap_or_default())
            }
            UserRole::DeptHead | UserRole::Admin => FeedbackScope::All,
        }
    }

    /// Visibility predicate for a single record
    pub fn allows(&self, feedback: &Feedback) -> bool {
        match self {
            FeedbackScope::All => true,
            FeedbackScope::Department(department) => {
                feedback.department.as_deref() == Some(department.as_str())
            }
            FeedbackScope::Own(user_id) => feedback.user_id == Some(*user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{feedback_fixture, user_fixture};

    #[test]
    fn test_citizen_sees_only_own_records() {
        let citizen = user_fixture(UserRole::Citizen, None);
        let scope = FeedbackScope::for_user(&citizen);

        let own = feedback_fixture(Some(citizen.id), Some("Public Works"));
        let other = feedback_fixture(Some(Uuid::new_v4()), Some("Public Works"));

        assert!(scope.allows(&own));
        assert!(!scope.allows(&other));
    }

    #[test]
    fn test_anonymous_records_invisible_to_citizens() {
        let citizen = user_fixture(UserRole::Citizen, None);
        let scope = FeedbackScope::for_user(&citizen);

        let anonymous = feedback_fixture(None, Some("Public Works"));
        assert!(!scope.allows(&anonymous));
    }

    #[test]
    fn test_officer_restricted_to_own_department() {
        let officer = user_fixture(UserRole::Officer, Some("Water Department"));
        let scope = FeedbackScope::for_user(&officer);

        let water = feedback_fixture(None, Some("Water Department"));
        let police = feedback_fixture(None, Some("Police Department"));

        assert!(scope.allows(&water));
        assert!(!scope.allows(&police));
    }

    #[test]
    fn test_officer_without_department_sees_nothing() {
        let officer = user_fixture(UserRole::Officer, None);
        let scope = FeedbackScope::for_user(&officer);

        let record = feedback_fixture(None, Some("Water Department"));
        assert!(!scope.allows(&record));
    }

    #[test]
    fn test_dept_head_and_admin_see_everything() {
        let record = feedback_fixture(Some(Uuid::new_v4()), Some("Health Department"));

        let dept_head = user_fixture(UserRole::DeptHead, Some("Water Department"));
        assert!(FeedbackScope::for_user(&dept_head).allows(&record));

        let admin = user_fixture(UserRole::Admin, None);
        assert!(FeedbackScope::for_user(&admin).allows(&record));
    }
}
