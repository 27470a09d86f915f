//! Role normalization.
//!
//! Different backend generations encode a member's role as a numeric
//! ordinal, an enum name, or a plain string, and several call sites
//! recompute it from slightly different raw fields. [`Role::classify`] is
//! the one pure function they all converge through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::backend::{RawMember, RawProject};

/// Numeric role ordinal the backend uses for the creator/admin role.
const ADMIN_ORDINAL: i64 = 0;

/// Binary permission classification for a project member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Collapse a raw role value into the binary classification.
    ///
    /// Order of precedence: creator identity wins unconditionally, then a
    /// numeric coercion against the admin ordinal, then a case-insensitive
    /// match on the admin synonyms, and everything unrecognized is a plain
    /// member. Pure and idempotent.
    pub fn classify(raw: Option<&Value>, is_creator: bool) -> Role {
        if is_creator {
            return Role::Admin;
        }
        let Some(raw) = raw else {
            return Role::Member;
        };
        if let Some(ordinal) = coerce_ordinal(raw) {
            return if ordinal == ADMIN_ORDINAL {
                Role::Admin
            } else {
                Role::Member
            };
        }
        if let Some(name) = raw.as_str() {
            let name = name.trim();
            if name.eq_ignore_ascii_case("admin") || name.eq_ignore_ascii_case("creator") {
                return Role::Admin;
            }
        }
        Role::Member
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

fn coerce_ordinal(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolve the viewing user's role from a raw project payload: creator-id
/// match first, then the member list entry for that user.
pub fn resolve_viewer_role(payload: &Value, viewer_id: Option<&str>) -> Role {
    let Some(viewer_id) = viewer_id else {
        return Role::Member;
    };
    let project = RawProject::from_payload(payload);
    if project.creator_id.as_deref() == Some(viewer_id) {
        return Role::Admin;
    }
    let membership = project
        .members
        .iter()
        .filter_map(RawMember::from_value_lenient)
        .find(|m| m.id.as_deref() == Some(viewer_id));
    match membership {
        Some(member) => Role::classify(member.role.as_ref(), false),
        None => Role::Member,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creator_dominates_any_role() {
        for raw in [json!(5), json!("member"), json!(null), json!(["x"])] {
            assert_eq!(Role::classify(Some(&raw), true), Role::Admin);
        }
        assert_eq!(Role::classify(None, true), Role::Admin);
    }

    #[test]
    fn test_numeric_ordinals() {
        assert_eq!(Role::classify(Some(&json!(0)), false), Role::Admin);
        assert_eq!(Role::classify(Some(&json!("0")), false), Role::Admin);
        assert_eq!(Role::classify(Some(&json!(1)), false), Role::Member);
        assert_eq!(Role::classify(Some(&json!(7)), false), Role::Member);
    }

    #[test]
    fn test_string_synonyms() {
        assert_eq!(Role::classify(Some(&json!("Admin")), false), Role::Admin);
        assert_eq!(Role::classify(Some(&json!("CREATOR")), false), Role::Admin);
        assert_eq!(Role::classify(Some(&json!(" admin ")), false), Role::Admin);
        assert_eq!(
            Role::classify(Some(&json!("moderator")), false),
            Role::Member
        );
    }

    #[test]
    fn test_unrecognized_values_are_members() {
        for raw in [json!(null), json!(true), json!({"role": 0}), json!("")] {
            assert_eq!(Role::classify(Some(&raw), false), Role::Member);
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let raw = json!("Admin");
        let first = Role::classify(Some(&raw), false);
        let second = Role::classify(Some(&raw), false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_viewer_role_from_project_payload() {
        let payload = json!({
            "id": "p1",
            "creatorId": "u-1",
            "members": [
                {"userId": "u-2", "role": "Admin"},
                {"userId": "u-3", "role": 1}
            ]
        });
        assert_eq!(resolve_viewer_role(&payload, Some("u-1")), Role::Admin);
        assert_eq!(resolve_viewer_role(&payload, Some("u-2")), Role::Admin);
        assert_eq!(resolve_viewer_role(&payload, Some("u-3")), Role::Member);
        assert_eq!(resolve_viewer_role(&payload, Some("u-9")), Role::Member);
        assert_eq!(resolve_viewer_role(&payload, None), Role::Member);
    }
}
