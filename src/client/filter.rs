use crate::models::{Event, EventStatus, Training, TrainingLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EventStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(TrainingLevel),
}

/// Events whose title or ministry contains `search` (case-insensitive) and
/// whose status passes `status`.
pub fn filter_events<'a>(
    events: &'a [Event],
    search: &str,
    status: StatusFilter,
) -> Vec<&'a Event> {
    let needle = search.trim().to_lowercase();
    events
        .iter()
        .filter(|event| contains(&event.title, &needle) || contains(&event.ministry, &needle))
        .filter(|event| match status {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => event.status == wanted,
        })
        .collect()
}

/// Trainings matched on title or instructor, then on level.
pub fn filter_trainings<'a>(
    trainings: &'a [Training],
    search: &str,
    level: LevelFilter,
) -> Vec<&'a Training> {
    let needle = search.trim().to_lowercase();
    trainings
        .iter()
        .filter(|training| {
            contains(&training.title, &needle) || contains(&training.instructor, &needle)
        })
        .filter(|training| match level {
            LevelFilter::All => true,
            LevelFilter::Only(wanted) => training.level == wanted,
        })
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}
