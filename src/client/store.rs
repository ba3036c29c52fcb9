use super::api::{ClientError, PortalApi};
use super::filter::{LevelFilter, StatusFilter, filter_events, filter_trainings};
use super::route::{Navigator, Page, View, ViewRouter, resolve};
use crate::messages::{
    ENROLL_FAILED, EVENT_CREATE_FAILED, EVENT_DELETE_FAILED, EVENT_DELETE_PROMPT,
    EVENT_UPDATE_FAILED, EVENTS_FETCH_FAILED, LOGIN_FAILED, TRAINING_CREATE_FAILED,
    TRAINING_DELETE_FAILED, TRAINING_DELETE_PROMPT, TRAINING_UPDATE_FAILED,
    TRAININGS_FETCH_FAILED,
};
use crate::models::{Event, EventPatch, NewEvent, NewTraining, Training, TrainingPatch};
use crate::stats::{DashboardSummary, build_summary};
use tracing::{debug, warn};
use uuid::Uuid;

/// Front-end state: cached lists, current selections, the active page and the
/// last user-facing error.
///
/// Lists are replaced wholesale on every successful fetch. Mutations patch the
/// cache with what the server returned; a failed call leaves the cache as it
/// was and records one message.
pub struct PortalStore<A, N = ViewRouter> {
    api: A,
    navigator: N,
    events: Vec<Event>,
    trainings: Vec<Training>,
    selected_event: Option<Event>,
    selected_training: Option<Training>,
    error: Option<String>,
}

impl<A: PortalApi> PortalStore<A> {
    pub fn new(api: A) -> Self {
        Self::with_navigator(api, ViewRouter::default())
    }
}

impl<A: PortalApi, N: Navigator> PortalStore<A, N> {
    pub fn with_navigator(api: A, navigator: N) -> Self {
        Self {
            api,
            navigator,
            events: Vec::new(),
            trainings: Vec::new(),
            selected_event: None,
            selected_training: None,
            error: None,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn trainings(&self) -> &[Training] {
        &self.trainings
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_event.as_ref()
    }

    pub fn selected_training(&self) -> Option<&Training> {
        self.selected_training.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_page(&self) -> Page {
        self.navigator.current()
    }

    pub fn view(&self) -> View {
        resolve(self.navigator.current(), self.selected_event.is_some())
    }

    /// Switches page and fetches the lists the new page shows.
    pub async fn navigate(&mut self, page: Page) -> View {
        let previous = self.navigator.navigate(page);
        debug!(from = previous.name(), to = page.name(), "navigate");

        if page.needs_events() {
            self.refresh_events().await;
        }
        if page.needs_trainings() {
            self.refresh_trainings().await;
        }
        self.view()
    }

    pub async fn refresh_events(&mut self) -> bool {
        match self.api.list_events().await {
            Ok(events) => {
                self.events = events;
                true
            }
            Err(err) => {
                self.fail(EVENTS_FETCH_FAILED, err);
                false
            }
        }
    }

    pub async fn refresh_trainings(&mut self) -> bool {
        match self.api.list_trainings().await {
            Ok(trainings) => {
                self.trainings = trainings;
                true
            }
            Err(err) => {
                self.fail(TRAININGS_FETCH_FAILED, err);
                false
            }
        }
    }

    pub async fn select_event(&mut self, event: Event) -> View {
        self.selected_event = Some(event);
        self.navigate(Page::EventDetails).await
    }

    pub fn select_training(&mut self, training: Training) {
        self.selected_training = Some(training);
    }

    /// Opens the edit form for the selected event.
    pub async fn edit_selected_event(&mut self) -> View {
        self.navigate(Page::EditEvent).await
    }

    pub async fn create_event(&mut self, draft: NewEvent) -> Result<Event, ClientError> {
        if let Err(err) = draft.validate() {
            return Err(self.reject(err.into()));
        }
        match self.api.create_event(&draft).await {
            Ok(event) => {
                self.events.push(event.clone());
                self.error = None;
                Ok(event)
            }
            Err(err) => Err(self.fail(EVENT_CREATE_FAILED, err)),
        }
    }

    /// Sends the patch, then returns to the events page, which re-fetches.
    pub async fn update_event(
        &mut self,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<Option<Event>, ClientError> {
        let updated = match self.api.update_event(id, &patch).await {
            Ok(updated) => updated,
            Err(err) => return Err(self.fail(EVENT_UPDATE_FAILED, err)),
        };

        if let Some(event) = &updated {
            replace_by_id(&mut self.events, event.clone(), |e: &Event| e.id);
            if self.selected_event.as_ref().is_some_and(|e| e.id == event.id) {
                self.selected_event = Some(event.clone());
            }
        }
        self.error = None;
        self.navigate(Page::Events).await;
        Ok(updated)
    }

    /// Asks `confirm` first; a refusal sends nothing and returns `Ok(false)`.
    pub async fn delete_event(
        &mut self,
        id: Uuid,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ClientError> {
        if !confirm(EVENT_DELETE_PROMPT) {
            return Ok(false);
        }
        if let Err(err) = self.api.delete_event(id).await {
            return Err(self.fail(EVENT_DELETE_FAILED, err));
        }

        self.events.retain(|event| event.id != id);
        if self.selected_event.as_ref().is_some_and(|event| event.id == id) {
            self.selected_event = None;
        }
        self.error = None;
        Ok(true)
    }

    pub async fn enroll_volunteer(&mut self, id: Uuid) -> Result<Event, ClientError> {
        match self.api.enroll_volunteer(id).await {
            Ok(event) => {
                replace_by_id(&mut self.events, event.clone(), |e: &Event| e.id);
                self.error = None;
                Ok(event)
            }
            Err(err) => Err(self.fail(ENROLL_FAILED, err)),
        }
    }

    pub async fn create_training(&mut self, draft: NewTraining) -> Result<Training, ClientError> {
        if let Err(err) = draft.validate() {
            return Err(self.reject(err.into()));
        }
        match self.api.create_training(&draft).await {
            Ok(training) => {
                self.trainings.push(training.clone());
                self.error = None;
                Ok(training)
            }
            Err(err) => Err(self.fail(TRAINING_CREATE_FAILED, err)),
        }
    }

    pub async fn update_training(
        &mut self,
        id: Uuid,
        patch: TrainingPatch,
    ) -> Result<Option<Training>, ClientError> {
        let updated = match self.api.update_training(id, &patch).await {
            Ok(updated) => updated,
            Err(err) => return Err(self.fail(TRAINING_UPDATE_FAILED, err)),
        };

        if let Some(training) = &updated {
            replace_by_id(&mut self.trainings, training.clone(), |t: &Training| t.id);
            if self
                .selected_training
                .as_ref()
                .is_some_and(|t| t.id == training.id)
            {
                self.selected_training = Some(training.clone());
            }
        }
        self.error = None;
        Ok(updated)
    }

    pub async fn delete_training(
        &mut self,
        id: Uuid,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ClientError> {
        if !confirm(TRAINING_DELETE_PROMPT) {
            return Ok(false);
        }
        if let Err(err) = self.api.delete_training(id).await {
            return Err(self.fail(TRAINING_DELETE_FAILED, err));
        }

        self.trainings.retain(|training| training.id != id);
        if self
            .selected_training
            .as_ref()
            .is_some_and(|training| training.id == id)
        {
            self.selected_training = None;
        }
        self.error = None;
        Ok(true)
    }

    pub async fn enroll_participant(&mut self, id: Uuid) -> Result<Training, ClientError> {
        match self.api.enroll_participant(id).await {
            Ok(training) => {
                replace_by_id(&mut self.trainings, training.clone(), |t: &Training| t.id);
                self.error = None;
                Ok(training)
            }
            Err(err) => Err(self.fail(ENROLL_FAILED, err)),
        }
    }

    /// Admin sign-in. Success opens the dashboard.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        match self.api.login(email, password).await {
            Ok(_) => {
                self.error = None;
                self.navigate(Page::Dashboard).await;
                true
            }
            Err(err) => {
                self.fail(LOGIN_FAILED, err);
                false
            }
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        build_summary(&self.events, &self.trainings)
    }

    pub fn filtered_events(&self, search: &str, status: StatusFilter) -> Vec<&Event> {
        filter_events(&self.events, search, status)
    }

    pub fn filtered_trainings(&self, search: &str, level: LevelFilter) -> Vec<&Training> {
        filter_trainings(&self.trainings, search, level)
    }

    fn fail(&mut self, message: &str, err: ClientError) -> ClientError {
        warn!("{message}: {err}");
        self.error = Some(message.to_string());
        err
    }

    fn reject(&mut self, err: ClientError) -> ClientError {
        self.error = Some(err.to_string());
        err
    }
}

fn replace_by_id<T>(items: &mut [T], item: T, id: impl Fn(&T) -> Uuid) {
    let wanted = id(&item);
    if let Some(slot) = items.iter_mut().find(|existing| id(existing) == wanted) {
        *slot = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{EVENT_DELETED, LOGIN_SUCCEEDED, REQUIRED_FIELDS, TRAINING_DELETED};
    use crate::models::{ErrorBody, EventStatus, MessageResponse};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// In-memory stand-in for the REST API.
    #[derive(Default)]
    struct FakeApi {
        events: Mutex<Vec<Event>>,
        trainings: Mutex<Vec<Training>>,
        offline: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeApi {
        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }

        fn record(&self, call: &'static str) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(call);
            if self.offline {
                return Err(ClientError::Server {
                    status: 500,
                    body: ErrorBody {
                        error: "down".into(),
                        message: String::new(),
                    },
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PortalApi for FakeApi {
        async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
            self.record("list_events")?;
            Ok(self.events.lock().unwrap().clone())
        }

        async fn create_event(&self, draft: &NewEvent) -> Result<Event, ClientError> {
            self.record("create_event")?;
            let event = draft.clone().into_event(Uuid::new_v4())?;
            self.events.lock().unwrap().push(event.clone());
            Ok(event)
        }

        async fn update_event(
            &self,
            id: Uuid,
            patch: &EventPatch,
        ) -> Result<Option<Event>, ClientError> {
            self.record("update_event")?;
            let mut events = self.events.lock().unwrap();
            let Some(event) = events.iter_mut().find(|e| e.id == id) else {
                return Ok(None);
            };
            *event = patch.clone().apply(event)?;
            Ok(Some(event.clone()))
        }

        async fn delete_event(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
            self.record("delete_event")?;
            self.events.lock().unwrap().retain(|e| e.id != id);
            Ok(MessageResponse::new(EVENT_DELETED))
        }

        async fn enroll_volunteer(&self, id: Uuid) -> Result<Event, ClientError> {
            self.record("enroll_volunteer")?;
            let mut events = self.events.lock().unwrap();
            let event = events.iter_mut().find(|e| e.id == id).ok_or_else(|| {
                ClientError::Server {
                    status: 404,
                    body: ErrorBody {
                        error: "missing".into(),
                        message: String::new(),
                    },
                }
            })?;
            event.volunteers += 1;
            Ok(event.clone())
        }

        async fn list_trainings(&self) -> Result<Vec<Training>, ClientError> {
            self.record("list_trainings")?;
            Ok(self.trainings.lock().unwrap().clone())
        }

        async fn create_training(&self, draft: &NewTraining) -> Result<Training, ClientError> {
            self.record("create_training")?;
            let training = draft.clone().into_training(Uuid::new_v4())?;
            self.trainings.lock().unwrap().push(training.clone());
            Ok(training)
        }

        async fn update_training(
            &self,
            id: Uuid,
            patch: &TrainingPatch,
        ) -> Result<Option<Training>, ClientError> {
            self.record("update_training")?;
            let mut trainings = self.trainings.lock().unwrap();
            let Some(training) = trainings.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            *training = patch.clone().apply(training)?;
            Ok(Some(training.clone()))
        }

        async fn delete_training(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
            self.record("delete_training")?;
            self.trainings.lock().unwrap().retain(|t| t.id != id);
            Ok(MessageResponse::new(TRAINING_DELETED))
        }

        async fn enroll_participant(&self, id: Uuid) -> Result<Training, ClientError> {
            self.record("enroll_participant")?;
            let mut trainings = self.trainings.lock().unwrap();
            let training = trainings.iter_mut().find(|t| t.id == id).ok_or_else(|| {
                ClientError::Server {
                    status: 404,
                    body: ErrorBody {
                        error: "missing".into(),
                        message: String::new(),
                    },
                }
            })?;
            training.participants += 1;
            Ok(training.clone())
        }

        async fn login(&self, email: &str, password: &str) -> Result<MessageResponse, ClientError> {
            self.record("login")?;
            if email == "admin@example.com" && password == "admin123" {
                Ok(MessageResponse::new(LOGIN_SUCCEEDED))
            } else {
                Err(ClientError::Server {
                    status: 401,
                    body: ErrorBody {
                        error: LOGIN_FAILED.into(),
                        message: LOGIN_FAILED.into(),
                    },
                })
            }
        }
    }

    fn draft(title: &str) -> NewEvent {
        NewEvent {
            title: title.into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1),
            time: "10:00".into(),
            location: "X".into(),
            max_volunteers: 5,
            leader: "Y".into(),
            ..NewEvent::default()
        }
    }

    fn training_draft(title: &str) -> NewTraining {
        NewTraining {
            title: title.into(),
            date: NaiveDate::from_ymd_opt(2025, 2, 1),
            time: "09:00".into(),
            location: "القاعة الرئيسية".into(),
            max_participants: 20,
            instructor: "د. سالم".into(),
            duration: "3 أيام".into(),
            ..NewTraining::default()
        }
    }

    #[tokio::test]
    async fn entering_dashboard_fetches_both_lists() {
        let mut store = PortalStore::new(FakeApi::default());
        let view = store.navigate(Page::Dashboard).await;

        assert_eq!(view, View::Page(Page::Dashboard));
        assert_eq!(store.api.calls(), vec!["list_events", "list_trainings"]);
    }

    #[tokio::test]
    async fn pages_without_lists_do_not_fetch() {
        let mut store = PortalStore::new(FakeApi::default());
        store.navigate(Page::Profile).await;
        assert!(store.api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_cache_and_sets_one_message() {
        let mut store = PortalStore::new(FakeApi::offline());
        store.events.push(draft("cached").into_event(Uuid::new_v4()).unwrap());

        store.navigate(Page::Events).await;
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.error(), Some(EVENTS_FETCH_FAILED));
        assert_eq!(store.api.calls(), vec!["list_events"]);
    }

    #[tokio::test]
    async fn create_appends_server_record() {
        let mut store = PortalStore::new(FakeApi::default());
        let event = store.create_event(draft("Test")).await.unwrap();

        assert_eq!(event.volunteers, 0);
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(store.events(), std::slice::from_ref(&event));
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_api() {
        let mut store = PortalStore::new(FakeApi::default());
        let err = store
            .create_event(NewEvent {
                location: String::new(),
                ..draft("Test")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(store.error(), Some(REQUIRED_FIELDS));
        assert!(store.api.calls().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut store = PortalStore::new(FakeApi::default());
        let event = store.create_event(draft("Keep")).await.unwrap();

        let deleted = store.delete_event(event.id, |_| false).await.unwrap();
        assert!(!deleted);
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.api.calls(), vec!["create_event"]);
    }

    #[tokio::test]
    async fn confirmed_delete_drops_cache_entry_and_selection() {
        let mut store = PortalStore::new(FakeApi::default());
        let event = store.create_event(draft("Drop")).await.unwrap();
        store.select_event(event.clone()).await;

        let mut prompt = String::new();
        let deleted = store
            .delete_event(event.id, |text| {
                prompt = text.to_string();
                true
            })
            .await
            .unwrap();

        assert!(deleted);
        assert_eq!(prompt, EVENT_DELETE_PROMPT);
        assert!(store.events().is_empty());
        assert!(store.selected_event().is_none());
        assert_eq!(store.view(), View::MissingSelection(Page::EventDetails));
    }

    #[tokio::test]
    async fn update_patches_cache_and_returns_to_events() {
        let mut store = PortalStore::new(FakeApi::default());
        let event = store.create_event(draft("Old")).await.unwrap();
        store.select_event(event.clone()).await;
        assert_eq!(store.edit_selected_event().await, View::Page(Page::EditEvent));

        let patch = EventPatch {
            title: Some("New".into()),
            ..EventPatch::default()
        };
        let updated = store.update_event(event.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(store.current_page(), Page::Events);
        assert_eq!(store.events()[0].title, "New");
        assert_eq!(store.selected_event().unwrap().title, "New");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_an_error() {
        let mut store = PortalStore::new(FakeApi::default());
        let updated = store
            .update_event(Uuid::new_v4(), EventPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn training_flow_mirrors_events() {
        let mut store = PortalStore::new(FakeApi::default());
        let training = store.create_training(training_draft("الإسعافات الأولية")).await.unwrap();
        assert_eq!(training.participants, 0);

        let enrolled = store.enroll_participant(training.id).await.unwrap();
        assert_eq!(enrolled.participants, 1);
        assert_eq!(store.trainings()[0].participants, 1);

        let deleted = store.delete_training(training.id, |_| true).await.unwrap();
        assert!(deleted);
        assert!(store.trainings().is_empty());
    }

    #[tokio::test]
    async fn login_opens_dashboard_only_with_valid_pair() {
        let mut store = PortalStore::new(FakeApi::default());
        assert!(!store.login("admin@example.com", "wrong").await);
        assert_eq!(store.error(), Some(LOGIN_FAILED));
        assert_eq!(store.current_page(), Page::Home);

        assert!(store.login("admin@example.com", "admin123").await);
        assert_eq!(store.current_page(), Page::Dashboard);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn dashboard_reflects_cached_lists() {
        let mut store = PortalStore::new(FakeApi::default());
        let event = store.create_event(draft("A")).await.unwrap();
        store.enroll_volunteer(event.id).await.unwrap();
        store.create_training(training_draft("B")).await.unwrap();

        let summary = store.dashboard();
        assert_eq!(summary.total_events, 1);
        assert_eq!(summary.active_events, 1);
        assert_eq!(summary.total_volunteers, 1);
        assert_eq!(summary.total_trainings, 1);
    }
}
