//! Role-based access policy for the API endpoints.

use crate::entities::account;
use crate::error::ModelError;

/// Role of the caller of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// No credentials, or credentials of an inactive account.
    Anonymous,
    /// Authenticated account without staff status.
    Member,
    /// Authenticated staff account.
    Admin,
}

impl Role {
    /// Resolve the role of an (optionally) authenticated account.
    pub fn of(account: Option<&account::Model>) -> Self {
        match account {
            Some(account) if !account.is_active => Role::Anonymous,
            Some(account) if account.is_staff => Role::Admin,
            Some(_) => Role::Member,
            None => Role::Anonymous,
        }
    }
}

/// Operations guarded by the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    CreateAccount,
    ObtainToken,
    ReadOwnProfile,
    AddOwnSkill,
    AddOwnJob,
    CreateSkill,
    ListSkills,
}

/// Check whether `role` may call `endpoint`.
pub fn authorize(endpoint: Endpoint, role: Role) -> Result<(), ModelError> {
    let allowed = match endpoint {
        Endpoint::CreateAccount | Endpoint::ObtainToken => true,
        Endpoint::CreateSkill => role == Role::Admin,
        Endpoint::ReadOwnProfile
        | Endpoint::AddOwnSkill
        | Endpoint::AddOwnJob
        | Endpoint::ListSkills => role != Role::Anonymous,
    };

    if allowed {
        Ok(())
    } else {
        Err(ModelError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(is_active: bool, is_staff: bool) -> account::Model {
        account::Model {
            id: 1,
            email: "user@mail.com".to_string(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            cellphone: None,
            photo: None,
            is_active,
            is_staff,
            is_superuser: false,
            last_login: None,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_role_resolution() {
        assert_eq!(Role::of(None), Role::Anonymous);
        assert_eq!(Role::of(Some(&account(true, false))), Role::Member);
        assert_eq!(Role::of(Some(&account(true, true))), Role::Admin);
        assert_eq!(Role::of(Some(&account(false, true))), Role::Anonymous);
    }

    #[test]
    fn test_policy_table() {
        use Endpoint::*;
        use Role::*;

        let cases = [
            (CreateAccount, Anonymous, true),
            (CreateAccount, Member, true),
            (CreateAccount, Admin, true),
            (ObtainToken, Anonymous, true),
            (ObtainToken, Member, true),
            (ObtainToken, Admin, true),
            (ReadOwnProfile, Anonymous, false),
            (ReadOwnProfile, Member, true),
            (ReadOwnProfile, Admin, true),
            (AddOwnSkill, Anonymous, false),
            (AddOwnSkill, Member, true),
            (AddOwnSkill, Admin, true),
            (AddOwnJob, Anonymous, false),
            (AddOwnJob, Member, true),
            (AddOwnJob, Admin, true),
            (CreateSkill, Anonymous, false),
            (CreateSkill, Member, false),
            (CreateSkill, Admin, true),
            (ListSkills, Anonymous, false),
            (ListSkills, Member, true),
            (ListSkills, Admin, true),
        ];
        assert_eq!(cases.len(), 21);

        for (endpoint, role, allowed) in cases {
            let outcome = authorize(endpoint, role);
            assert_eq!(outcome.is_ok(), allowed, "{:?} as {:?}", endpoint, role);
            if !allowed {
                assert!(matches!(outcome, Err(ModelError::Forbidden)));
            }
        }
    }
}
