// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::MemberRole;
use std::str::FromStr;

#[test]
fn test_role_string_round_trip() {
    for role in [MemberRole::Owner, MemberRole::Admin, MemberRole::Member] {
        assert_eq!(MemberRole::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_unknown_role_is_rejected() {
    assert!(MemberRole::from_str("SUPERUSER").is_err());
    assert!(MemberRole::from_str("owner").is_err());
}

#[test]
fn test_only_owner_and_admin_manage_events() {
    assert!(MemberRole::Owner.can_manage_event());
    assert!(MemberRole::Admin.can_manage_event());
    assert!(!MemberRole::Member.can_manage_event());
}

#[test]
fn test_admin_removes_members_only() {
    assert!(MemberRole::Admin.can_remove(MemberRole::Member));
    assert!(!MemberRole::Admin.can_remove(MemberRole::Admin));
    assert!(!MemberRole::Admin.can_remove(MemberRole::Owner));
}

#[test]
fn test_owner_removes_anyone() {
    assert!(MemberRole::Owner.can_remove(MemberRole::Member));
    assert!(MemberRole::Owner.can_remove(MemberRole::Admin));
    assert!(MemberRole::Owner.can_remove(MemberRole::Owner));
}

#[test]
fn test_member_removes_nobody() {
    assert!(!MemberRole::Member.can_remove(MemberRole::Member));
}

#[test]
fn test_owner_cannot_leave() {
    assert!(!MemberRole::Owner.can_leave());
    assert!(MemberRole::Admin.can_leave());
    assert!(MemberRole::Member.can_leave());
}
