//! Who may do what with a trip.
//!
//! Every trip-scoped statement embeds one of the predicates below, with `t`
//! aliasing `trips` and `$2` bound to the requester (`NULL` when anonymous).
//! Authorization therefore happens inside the same statement as the read or
//! mutation it guards.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `$2` may read `t`: owner, shared with, or public.
pub(crate) const CAN_READ: &str = "(t.is_public OR t.user_id = $2 OR EXISTS (\
     SELECT 1 FROM shared_trips s WHERE s.trip_id = t.id AND s.user_id = $2))";

/// `$2` may change `t`'s children: owner or editor.
pub(crate) const CAN_WRITE: &str = "(t.user_id = $2 OR EXISTS (\
     SELECT 1 FROM shared_trips s WHERE s.trip_id = t.id AND s.user_id = $2 AND s.role = 'editor'))";

/// Capability granted by a share record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareRole {
    Viewer,
    Editor,
}

impl ShareRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ShareRole::Viewer => "viewer",
            ShareRole::Editor => "editor",
        }
    }
}

impl FromStr for ShareRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(ShareRole::Viewer),
            "editor" => Ok(ShareRole::Editor),
            other => anyhow::bail!("unknown share role {other:?}"),
        }
    }
}

impl fmt::Display for ShareRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requester's effective standing on a trip, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TripRole {
    Public,
    Viewer,
    Editor,
    Owner,
}

impl TripRole {
    pub fn can_write(self) -> bool {
        self >= TripRole::Editor
    }

    /// Editing the trip itself, deleting it, managing shares.
    pub fn can_manage(self) -> bool {
        self == TripRole::Owner
    }
}

impl From<ShareRole> for TripRole {
    fn from(r: ShareRole) -> Self {
        match r {
            ShareRole::Viewer => TripRole::Viewer,
            ShareRole::Editor => TripRole::Editor,
        }
    }
}

/// Rust form of [`CAN_READ`]; `None` means the trip must look nonexistent.
pub fn resolve_role(
    owner_id: Uuid,
    is_public: bool,
    requester: Option<Uuid>,
    share: Option<ShareRole>,
) -> Option<TripRole> {
    if requester == Some(owner_id) {
        return Some(TripRole::Owner);
    }
    match (requester, share) {
        (Some(_), Some(role)) => Some(role.into()),
        _ if is_public => Some(TripRole::Public),
        _ => None,
    }
}
