//! Rendering gate: which parts of the UI a session may see.
//!
//! The back-office UI asks for its navigation once per session and renders
//! only what comes back, so a hidden control corresponds exactly to a request
//! the server would reject.

use serde::Serialize;

use fieldops_auth::{Action, GuardRequest, InvalidGuardRequest, PermissionContext, evaluate};

/// Run `render` only when `guard` holds for `ctx`.
pub fn render_if<T>(
    ctx: &PermissionContext,
    guard: &GuardRequest,
    render: impl FnOnce() -> T,
) -> Option<T> {
    evaluate(ctx, guard).then(render)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    #[serde(skip)]
    pub guard: GuardRequest,
}

/// The navigation model, guards validated once at startup.
#[derive(Debug, Clone)]
pub struct Navigation {
    entries: Vec<NavEntry>,
}

impl Navigation {
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Result<Self, InvalidGuardRequest> {
        let entry = |id: &'static str, label: &'static str, path: &'static str, guard: GuardRequest| NavEntry {
            id,
            label,
            path,
            guard,
        };

        Ok(Self::new(vec![
            entry("orders", "Orders", "/orders", GuardRequest::single(Action::OrdersView)),
            entry("orders_new", "New order", "/orders/new", GuardRequest::single(Action::OrdersCreate)),
            entry(
                "delivery_notes",
                "Delivery notes",
                "/delivery-notes",
                GuardRequest::any([Action::DeliveryNotesView, Action::DeliveryNotesCreate])?,
            ),
            entry(
                "attendance",
                "Attendance",
                "/attendance",
                GuardRequest::any([
                    Action::AttendanceView,
                    Action::AttendanceRecord,
                    Action::AttendanceManage,
                ])?,
            ),
            entry("calendar", "Calendar", "/calendar", GuardRequest::single(Action::CalendarView)),
            entry("payments", "Payments", "/payments", GuardRequest::single(Action::PaymentsView)),
            entry(
                "payment_approvals",
                "Approvals",
                "/payments/approvals",
                GuardRequest::all([Action::PaymentsView, Action::PaymentsApprove])?,
            ),
            entry("clients", "Clients", "/clients", GuardRequest::single(Action::ClientsView)),
            entry("staff", "Staff", "/staff", GuardRequest::single(Action::UsersView)),
            entry("my_orders", "My orders", "/portal/orders", GuardRequest::single(Action::OrdersTrack)),
        ]))
    }

    pub fn visible_entries(&self, ctx: &PermissionContext) -> Vec<&NavEntry> {
        self.entries
            .iter()
            .filter_map(|entry| render_if(ctx, &entry.guard, || entry))
            .collect()
    }
}
