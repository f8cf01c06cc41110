//! Keeps the inspected station valid while snapshots are replaced wholesale.

use crate::station::{StationCollection, StationRecord};
use tracing::debug;

/// Resolves `selected_id` against the newest snapshot.
///
/// Returns the new snapshot's record for the id, or `None` when there was no
/// selection or the station disappeared. Never introduces a selection.
pub fn reconcile(
    selected_id: Option<&str>,
    previous: Option<&StationCollection>,
    next: &StationCollection,
) -> Option<StationRecord> {
    let id = selected_id?;
    let resolved = next.find(id).cloned();

    if let (Some(before), Some(after)) = (previous.and_then(|p| p.find(id)), resolved.as_ref()) {
        if before != after {
            debug!(
                station_id = id,
                bikes_before = before.bikes_available,
                bikes_after = after.bikes_available,
                "selected station changed"
            );
        }
    }

    resolved
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing was selected.
    Idle,
    Kept,
    Retired(String),
}

/// Owner of the current selection. Only clicks select; only snapshots retire.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    station_id: Option<String>,
}

impl Selection {
    pub fn select(&mut self, station_id: impl Into<String>) {
        self.station_id = Some(station_id.into());
    }

    pub fn clear(&mut self) {
        self.station_id = None;
    }

    pub fn station_id(&self) -> Option<&str> {
        self.station_id.as_deref()
    }

    pub const fn is_active(&self) -> bool {
        self.station_id.is_some()
    }

    /// The record shown in the detail panel for this snapshot.
    pub fn resolve<'a>(&self, snapshot: &'a StationCollection) -> Option<&'a StationRecord> {
        snapshot.find(self.station_id.as_deref()?)
    }

    /// Run once per accepted snapshot, before markers are derived from it.
    pub fn reconcile(
        &mut self,
        previous: Option<&StationCollection>,
        next: &StationCollection,
    ) -> Reconciliation {
        let Some(id) = self.station_id.take() else {
            return Reconciliation::Idle;
        };

        if reconcile(Some(&id), previous, next).is_some() {
            self.station_id = Some(id);
            Reconciliation::Kept
        } else {
            debug!(station_id = %id, "selected station left the snapshot");
            Reconciliation::Retired(id)
        }
    }
}
