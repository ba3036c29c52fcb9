use crate::messages::{
    OVER_CAPACITY, REQUIRED_FIELDS, TRAINING_CAPACITY_REQUIRED, TRAINING_DATE_REQUIRED,
    TRAINING_DURATION_REQUIRED, TRAINING_INSTRUCTOR_REQUIRED, TRAINING_LOCATION_REQUIRED,
    TRAINING_TIME_REQUIRED, TRAINING_TITLE_REQUIRED,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organizing ministries offered by the portal forms.
///
/// Stored values are free text; this list is only used to match them in the UI.
pub const MINISTRIES: [&str; 8] = [
    "وزارة الثقافة والرياضة والشباب",
    "وزارة البيئة والشؤون المناخية",
    "وزارة التراث والسياحة",
    "وزارة التنمية الاجتماعية",
    "وزارة الصحة",
    "وزارة التربية والتعليم",
    "وزارة الزراعة والثروة السمكية والموارد المائية",
    "وزارة النقل والاتصالات وتقنية المعلومات",
];

pub fn is_known_ministry(name: &str) -> bool {
    MINISTRIES.contains(&name.trim())
}

/// Resolves a record id from a path segment or a stored `_id`.
///
/// Anything that is not a UUID (the older store used 24-hex ObjectIds) maps to
/// a name-based UUID, so the same legacy id always lands on the same record.
pub fn parse_record_id(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        Uuid::parse_str(raw)
            .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes())),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Training difficulty. The Arabic labels are what the original forms submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLevel {
    #[default]
    #[serde(alias = "مبتدئ")]
    Beginner,
    #[serde(alias = "متوسط")]
    Intermediate,
    #[serde(alias = "متقدم")]
    Advanced,
}

impl TrainingLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "مبتدئ",
            Self::Intermediate => "متوسط",
            Self::Advanced => "متقدم",
        }
    }
}

/// Shared view over events and trainings: something with a headcount and a capacity.
pub trait Entity {
    fn id(&self) -> Uuid;
    fn title(&self) -> &str;
    fn headcount(&self) -> u32;
    fn capacity(&self) -> u32;
    fn headcount_mut(&mut self) -> &mut u32;

    fn is_full(&self) -> bool {
        self.headcount() >= self.capacity()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", deserialize_with = "record_id::deserialize")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub volunteers: u32,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub max_volunteers: u32,
    #[serde(default)]
    pub leader: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Entity for Event {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn headcount(&self) -> u32 {
        self.volunteers
    }

    fn capacity(&self) -> u32 {
        self.max_volunteers
    }

    fn headcount_mut(&mut self) -> &mut u32 {
        &mut self.volunteers
    }
}

/// Training record.
///
/// Documents written in the older event-shaped layout (`volunteers`,
/// `maxVolunteers`, `leader`, `status`) deserialize through the aliases below;
/// the legacy `status` is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(rename = "_id", deserialize_with = "record_id::deserialize")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "volunteers", deserialize_with = "count::deserialize")]
    pub participants: u32,
    #[serde(default, alias = "maxVolunteers", deserialize_with = "count::deserialize")]
    pub max_participants: u32,
    #[serde(default, alias = "leader")]
    pub instructor: String,
    #[serde(default)]
    pub level: TrainingLevel,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl Entity for Training {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn headcount(&self) -> u32 {
        self.participants
    }

    fn capacity(&self) -> u32 {
        self.max_participants
    }

    fn headcount_mut(&mut self) -> &mut u32 {
        &mut self.participants
    }
}

/// Body of `POST /events`: every event field except id, volunteers and status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(default, with = "calendar_date::option")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub max_volunteers: u32,
    #[serde(default)]
    pub leader: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing_text = [&self.title, &self.time, &self.location]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing_text || self.date.is_none() {
            return Err(ValidationError::new(REQUIRED_FIELDS));
        }
        Ok(())
    }

    /// Validates the draft and fills the server-assigned defaults.
    pub fn into_event(self, id: Uuid) -> Result<Event, ValidationError> {
        self.validate()?;
        let date = self.date.ok_or_else(|| ValidationError::new(REQUIRED_FIELDS))?;

        Ok(Event {
            id,
            title: self.title,
            ministry: self.ministry,
            date,
            time: self.time,
            location: self.location,
            volunteers: 0,
            max_volunteers: self.max_volunteers,
            leader: self.leader,
            status: EventStatus::Active,
            description: self.description,
            image: self.image,
        })
    }
}

/// Body of `PUT /events/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ministry: Option<String>,
    #[serde(
        default,
        with = "calendar_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "count::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub volunteers: Option<u32>,
    #[serde(
        default,
        deserialize_with = "count::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_volunteers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&Event> for EventPatch {
    fn from(event: &Event) -> Self {
        Self {
            title: Some(event.title.clone()),
            ministry: Some(event.ministry.clone()),
            date: Some(event.date),
            time: Some(event.time.clone()),
            location: Some(event.location.clone()),
            volunteers: Some(event.volunteers),
            max_volunteers: Some(event.max_volunteers),
            leader: Some(event.leader.clone()),
            status: Some(event.status),
            description: Some(event.description.clone()),
            image: Some(event.image.clone()),
        }
    }
}

impl EventPatch {
    /// Returns `current` with the supplied fields replaced.
    ///
    /// The headcount may not exceed capacity once either of them is touched.
    pub fn apply(self, current: &Event) -> Result<Event, ValidationError> {
        let touches_capacity = self.volunteers.is_some() || self.max_volunteers.is_some();
        let mut next = current.clone();

        if let Some(title) = self.title {
            next.title = title;
        }
        if let Some(ministry) = self.ministry {
            next.ministry = ministry;
        }
        if let Some(date) = self.date {
            next.date = date;
        }
        if let Some(time) = self.time {
            next.time = time;
        }
        if let Some(location) = self.location {
            next.location = location;
        }
        if let Some(volunteers) = self.volunteers {
            next.volunteers = volunteers;
        }
        if let Some(max_volunteers) = self.max_volunteers {
            next.max_volunteers = max_volunteers;
        }
        if let Some(leader) = self.leader {
            next.leader = leader;
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(description) = self.description {
            next.description = description;
        }
        if let Some(image) = self.image {
            next.image = image;
        }

        if [&next.title, &next.time, &next.location]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::new(REQUIRED_FIELDS));
        }
        if touches_capacity && next.volunteers > next.max_volunteers {
            return Err(ValidationError::new(OVER_CAPACITY));
        }
        Ok(next)
    }
}

/// Body of `POST /trainings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTraining {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(default, with = "calendar_date::option")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub max_participants: u32,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub level: TrainingLevel,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl NewTraining {
    /// Checks fields in form order and reports the first one missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        first_missing(&[
            (self.title.trim().is_empty(), TRAINING_TITLE_REQUIRED),
            (self.date.is_none(), TRAINING_DATE_REQUIRED),
            (self.time.trim().is_empty(), TRAINING_TIME_REQUIRED),
            (self.location.trim().is_empty(), TRAINING_LOCATION_REQUIRED),
            (self.max_participants == 0, TRAINING_CAPACITY_REQUIRED),
            (self.instructor.trim().is_empty(), TRAINING_INSTRUCTOR_REQUIRED),
            (self.duration.trim().is_empty(), TRAINING_DURATION_REQUIRED),
        ])
    }

    pub fn into_training(self, id: Uuid) -> Result<Training, ValidationError> {
        self.validate()?;
        let date = self
            .date
            .ok_or_else(|| ValidationError::new(TRAINING_DATE_REQUIRED))?;

        Ok(Training {
            id,
            title: self.title,
            ministry: self.ministry,
            date,
            time: self.time,
            location: self.location,
            participants: 0,
            max_participants: self.max_participants,
            instructor: self.instructor,
            level: self.level,
            duration: self.duration,
            description: self.description,
            image: self.image,
            category: self.category,
        })
    }
}

fn first_missing(checks: &[(bool, &str)]) -> Result<(), ValidationError> {
    match checks.iter().find(|(failed, _)| *failed) {
        Some((_, message)) => Err(ValidationError::new(*message)),
        None => Ok(()),
    }
}

/// Body of `PUT /trainings/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ministry: Option<String>,
    #[serde(
        default,
        with = "calendar_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "count::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub participants: Option<u32>,
    #[serde(
        default,
        deserialize_with = "count::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<TrainingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TrainingPatch {
    pub fn apply(self, current: &Training) -> Result<Training, ValidationError> {
        let touches_capacity = self.participants.is_some() || self.max_participants.is_some();
        let mut next = current.clone();

        if let Some(title) = self.title {
            next.title = title;
        }
        if let Some(ministry) = self.ministry {
            next.ministry = ministry;
        }
        if let Some(date) = self.date {
            next.date = date;
        }
        if let Some(time) = self.time {
            next.time = time;
        }
        if let Some(location) = self.location {
            next.location = location;
        }
        if let Some(participants) = self.participants {
            next.participants = participants;
        }
        if let Some(max_participants) = self.max_participants {
            if max_participants == 0 {
                return Err(ValidationError::new(TRAINING_CAPACITY_REQUIRED));
            }
            next.max_participants = max_participants;
        }
        if let Some(instructor) = self.instructor {
            next.instructor = instructor;
        }
        if let Some(level) = self.level {
            next.level = level;
        }
        if let Some(duration) = self.duration {
            next.duration = duration;
        }
        if let Some(description) = self.description {
            next.description = description;
        }
        if let Some(image) = self.image {
            next.image = image;
        }
        if let Some(category) = self.category {
            next.category = category;
        }

        first_missing(&[
            (next.title.trim().is_empty(), TRAINING_TITLE_REQUIRED),
            (next.time.trim().is_empty(), TRAINING_TIME_REQUIRED),
            (next.location.trim().is_empty(), TRAINING_LOCATION_REQUIRED),
            (next.instructor.trim().is_empty(), TRAINING_INSTRUCTOR_REQUIRED),
            (next.duration.trim().is_empty(), TRAINING_DURATION_REQUIRED),
        ])?;
        if touches_capacity && next.participants > next.max_participants {
            return Err(ValidationError::new(OVER_CAPACITY));
        }
        Ok(next)
    }
}

/// The whole document store: one collection per entity, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub trainings: Vec<Training>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Flat error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Calendar dates travel as `YYYY-MM-DD`; RFC 3339 timestamps are accepted on input.
mod calendar_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|stamp| stamp.date_naive())
        })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`")))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&date.format(super::FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        /// Empty strings count as "not provided", the way blank form inputs arrive.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`"))),
            }
        }
    }
}

/// Stored ids are plain strings, or `{"$oid": ...}` in exported legacy documents.
mod record_id {
    use serde::{Deserialize, Deserializer, de::Error};
    use uuid::Uuid;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        ObjectId {
            #[serde(rename = "$oid")]
            oid: String,
        },
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::ObjectId { oid } => oid,
        };
        super::parse_record_id(&raw).ok_or_else(|| D::Error::custom("empty record id"))
    }
}

/// Counters arrive either as JSON numbers or as numeric strings from form inputs.
mod count {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(u64),
        Float(f64),
        Text(String),
    }

    fn convert<E: Error>(raw: Raw) -> Result<Option<u32>, E> {
        match raw {
            Raw::Integer(value) => u32::try_from(value).map(Some).map_err(E::custom),
            Raw::Float(value)
                if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) =>
            {
                Ok(Some(value as u32))
            }
            Raw::Float(value) => Err(E::custom(format!("invalid count {value}"))),
            Raw::Text(text) if text.trim().is_empty() => Ok(None),
            Raw::Text(text) => text.trim().parse::<u32>().map(Some).map_err(E::custom),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        Ok(convert::<D::Error>(Raw::deserialize(deserializer)?)?.unwrap_or_default())
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => convert(raw),
            None => Ok(None),
        }
    }
}
