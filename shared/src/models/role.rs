//! Role Model
//!
//! The six marketplace roles and the participation kinds an order row can
//! attach them with. Wire tokens are kebab-case; the legacy status vocabulary
//! (`pending_manager`, `pending_warehouse`, ...) keeps its own names and is
//! mapped in one place, [`Role::status_token`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marketplace role of an account or order participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Coordinator,
    Contractor,
    Client,
    Site,
    FieldCrew,
    Depot,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Coordinator,
        Role::Contractor,
        Role::Client,
        Role::Site,
        Role::FieldCrew,
        Role::Depot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Coordinator => "coordinator",
            Role::Contractor => "contractor",
            Role::Client => "client",
            Role::Site => "site",
            Role::FieldCrew => "field-crew",
            Role::Depot => "depot",
        }
    }

    /// Token this role goes by inside status names and approval lists.
    ///
    /// Status tokens predate the current role names and are kept stable on
    /// the wire: `pending_customer` awaits a client, `pending_manager` a
    /// coordinator, `pending_warehouse` a depot.
    pub fn status_token(&self) -> &'static str {
        match self {
            Role::Coordinator => "manager",
            Role::Contractor => "contractor",
            Role::Client => "customer",
            Role::Site => "site",
            Role::FieldCrew => "field-crew",
            Role::Depot => "warehouse",
        }
    }

    /// Inverse of [`Role::status_token`] for the roles that appear in
    /// approval chains.
    pub fn from_status_token(token: &str) -> Option<Role> {
        match token {
            "manager" => Some(Role::Coordinator),
            "contractor" => Some(Role::Contractor),
            "customer" => Some(Role::Client),
            "site" => Some(Role::Site),
            "field-crew" => Some(Role::FieldCrew),
            "warehouse" => Some(Role::Depot),
            _ => None,
        }
    }

    /// Roles that act on orders (vs. watch them) when bulk-attached as
    /// participants.
    pub fn is_actor(&self) -> bool {
        matches!(
            self,
            Role::Coordinator | Role::Contractor | Role::FieldCrew | Role::Depot
        )
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coordinator" => Ok(Role::Coordinator),
            "contractor" => Ok(Role::Contractor),
            "client" => Ok(Role::Client),
            "site" => Ok(Role::Site),
            "field-crew" => Ok(Role::FieldCrew),
            "depot" => Ok(Role::Depot),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a participant row is attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipationType {
    Creator,
    Destination,
    Actor,
    Watcher,
}

impl ParticipationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationType::Creator => "creator",
            ParticipationType::Destination => "destination",
            ParticipationType::Actor => "actor",
            ParticipationType::Watcher => "watcher",
        }
    }
}

impl FromStr for ParticipationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(ParticipationType::Creator),
            "destination" => Ok(ParticipationType::Destination),
            "actor" => Ok(ParticipationType::Actor),
            "watcher" => Ok(ParticipationType::Watcher),
            other => Err(format!("unknown participation type '{other}'")),
        }
    }
}

impl fmt::Display for ParticipationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal fulfiller of a service order, decided by the catalog entry's
/// `managed_by` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinalActor {
    Coordinator,
    Depot,
}

impl FinalActor {
    pub fn as_role(&self) -> Role {
        match self {
            FinalActor::Coordinator => Role::Coordinator,
            FinalActor::Depot => Role::Depot,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.as_role().as_str()
    }
}

impl FromStr for FinalActor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coordinator" => Ok(FinalActor::Coordinator),
            "depot" => Ok(FinalActor::Depot),
            other => Err(format!("unknown terminal fulfiller '{other}'")),
        }
    }
}

impl fmt::Display for FinalActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn status_tokens_map_back() {
        for role in Role::ALL {
            assert_eq!(Role::from_status_token(role.status_token()), Some(role));
        }
        assert_eq!(Role::Client.status_token(), "customer");
        assert_eq!(Role::Coordinator.status_token(), "manager");
        assert_eq!(Role::Depot.status_token(), "warehouse");
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Role::FieldCrew).unwrap();
        assert_eq!(json, "\"field-crew\"");
        let back: Role = serde_json::from_str("\"depot\"").unwrap();
        assert_eq!(back, Role::Depot);
    }
}
