//! Page selection for the portal front end.
//!
//! One [`Page`] value decides what is rendered. There is no nesting and no URL
//! sync; the only rule is that a detail page needs a selected event first.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Register,
    EditEvent,
    Health,
    EventDetails,
    Profile,
    Training,
    Volunteers,
    Setting,
    Admin,
    Chatbot,
    Dashboard,
    Events,
    Calendar,
}

impl Page {
    pub const ALL: [Page; 14] = [
        Page::Home,
        Page::Register,
        Page::EditEvent,
        Page::Health,
        Page::EventDetails,
        Page::Profile,
        Page::Training,
        Page::Volunteers,
        Page::Setting,
        Page::Admin,
        Page::Chatbot,
        Page::Dashboard,
        Page::Events,
        Page::Calendar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Register => "register",
            Page::EditEvent => "edit-event",
            Page::Health => "health",
            Page::EventDetails => "event-details",
            Page::Profile => "profile",
            Page::Training => "training",
            Page::Volunteers => "volunteers",
            Page::Setting => "setting",
            Page::Admin => "admin",
            Page::Chatbot => "chatbot",
            Page::Dashboard => "dashboard",
            Page::Events => "events",
            Page::Calendar => "calendar",
        }
    }

    /// Unknown names land on the home page.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|page| page.name() == name.trim())
            .unwrap_or_default()
    }

    pub fn needs_events(self) -> bool {
        matches!(self, Page::Volunteers | Page::Events | Page::Dashboard)
    }

    pub fn needs_trainings(self) -> bool {
        matches!(self, Page::Training | Page::Dashboard)
    }

    pub fn requires_selected_event(self) -> bool {
        matches!(self, Page::EditEvent | Page::EventDetails)
    }

    pub fn chrome(self) -> Chrome {
        match self {
            Page::Dashboard | Page::Events | Page::Training | Page::Calendar => Chrome::Sidebar,
            _ => Chrome::HeaderFooter,
        }
    }
}

/// Frame drawn around a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    Sidebar,
    HeaderFooter,
}

/// What the renderer should draw for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Page(Page),
    /// The page needs a selected event and none is set.
    MissingSelection(Page),
}

impl View {
    pub fn page(self) -> Page {
        match self {
            View::Page(page) | View::MissingSelection(page) => page,
        }
    }
}

pub fn resolve(page: Page, has_selected_event: bool) -> View {
    if page.requires_selected_event() && !has_selected_event {
        View::MissingSelection(page)
    } else {
        View::Page(page)
    }
}

pub trait Navigator {
    fn current(&self) -> Page;

    /// Switches to `page` and returns the page that was active before.
    fn navigate(&mut self, page: Page) -> Page;
}

#[derive(Debug, Default)]
pub struct ViewRouter {
    current: Page,
}

impl ViewRouter {
    pub fn new(start: Page) -> Self {
        Self { current: start }
    }
}

impl Navigator for ViewRouter {
    fn current(&self) -> Page {
        self.current
    }

    fn navigate(&mut self, page: Page) -> Page {
        std::mem::replace(&mut self.current, page)
    }
}
