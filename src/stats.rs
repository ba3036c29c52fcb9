use crate::models::{Entity, Event, EventStatus, Training};
use serde::Serialize;

const PREVIEW_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: usize,
    pub active_events: usize,
    pub total_volunteers: u64,
    pub total_trainings: usize,
    pub recent_events: Vec<Event>,
    pub upcoming_trainings: Vec<Training>,
}

pub fn build_summary(events: &[Event], trainings: &[Training]) -> DashboardSummary {
    DashboardSummary {
        total_events: events.len(),
        active_events: events
            .iter()
            .filter(|event| event.status == EventStatus::Active)
            .count(),
        total_volunteers: events
            .iter()
            .map(|event| u64::from(event.volunteers))
            .sum(),
        total_trainings: trainings.len(),
        recent_events: events.iter().take(PREVIEW_COUNT).cloned().collect(),
        upcoming_trainings: trainings.iter().take(PREVIEW_COUNT).cloned().collect(),
    }
}

/// Headcount over capacity, or `None` when there is no capacity to fill.
pub fn fill_ratio(entity: &impl Entity) -> Option<f64> {
    match entity.capacity() {
        0 => None,
        capacity => Some(f64::from(entity.headcount()) / f64::from(capacity)),
    }
}

/// Progress-bar width in whole percent, clamped to `0..=100`.
pub fn fill_percent(entity: &impl Entity) -> u8 {
    fill_ratio(entity)
        .map(|ratio| (ratio * 100.0).round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}
