//! Action catalog: the closed set of authorizable operations.
//!
//! Every action has a stable dotted key (`"orders.edit"`) scoped to a resource
//! family. Keys are never reused: an action whose meaning changes gets a new
//! variant and a new key.

use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Resource family an action is scoped to (the part of the key before the dot).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceFamily {
    Orders,
    DeliveryNotes,
    Attendance,
    Calendar,
    Payments,
    Clients,
    Users,
    Files,
}

impl ResourceFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceFamily::Orders => "orders",
            ResourceFamily::DeliveryNotes => "delivery_notes",
            ResourceFamily::Attendance => "attendance",
            ResourceFamily::Calendar => "calendar",
            ResourceFamily::Payments => "payments",
            ResourceFamily::Clients => "clients",
            ResourceFamily::Users => "users",
            ResourceFamily::Files => "files",
        }
    }
}

impl core::fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action key that is not part of the catalog.
///
/// This is a parse outcome, not a denial. It is folded into `false` only at
/// the resolver and guard string boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

macro_rules! action_catalog {
    ($( $(#[$meta:meta])* $variant:ident => ($key:literal, $family:ident, $desc:literal), )+) => {
        /// Authorizable operation.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Action {
            $( $(#[$meta])* $variant, )+
        }

        impl Action {
            /// The full catalog, in declaration order.
            pub const ALL: &'static [Action] = &[ $( Action::$variant, )+ ];

            /// Stable external identifier.
            pub fn key(&self) -> &'static str {
                match self {
                    $( Action::$variant => $key, )+
                }
            }

            pub fn family(&self) -> ResourceFamily {
                match self {
                    $( Action::$variant => ResourceFamily::$family, )+
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $( Action::$variant => $desc, )+
                }
            }
        }

        impl FromStr for Action {
            type Err = UnknownAction;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $key => Ok(Action::$variant), )+
                    other => Err(UnknownAction(other.to_string())),
                }
            }
        }
    };
}

action_catalog! {
    OrdersView => ("orders.view", Orders, "List and read work orders"),
    OrdersCreate => ("orders.create", Orders, "Open a work order"),
    OrdersEdit => ("orders.edit", Orders, "Modify a work order"),
    OrdersDelete => ("orders.delete", Orders, "Delete a work order"),
    /// Portal-side view restricted to the client's own orders.
    OrdersTrack => ("orders.track", Orders, "Follow own orders from the client portal"),
    DeliveryNotesView => ("delivery_notes.view", DeliveryNotes, "Read delivery notes"),
    DeliveryNotesCreate => ("delivery_notes.create", DeliveryNotes, "Issue a delivery note"),
    DeliveryNotesSign => ("delivery_notes.sign", DeliveryNotes, "Countersign a delivery note"),
    AttendanceView => ("attendance.view", Attendance, "Read attendance records"),
    AttendanceRecord => ("attendance.record", Attendance, "Clock in and out"),
    AttendanceManage => ("attendance.manage", Attendance, "Correct attendance of other staff"),
    CalendarView => ("calendar.view", Calendar, "Read the shared calendar"),
    CalendarManage => ("calendar.manage", Calendar, "Schedule and reassign calendar events"),
    PaymentsView => ("payments.view", Payments, "Read payment state"),
    PaymentsApprove => ("payments.approve", Payments, "Approve a payment"),
    ClientsView => ("clients.view", Clients, "Read client accounts"),
    ClientsManage => ("clients.manage", Clients, "Create and modify client accounts"),
    UsersView => ("users.view", Users, "Read staff accounts"),
    UsersManage => ("users.manage", Users, "Create and modify staff accounts and roles"),
    FilesView => ("files.view", Files, "Open private attachments"),
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
