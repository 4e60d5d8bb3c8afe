use cucumber::World;
use std::sync::Arc;
use std::time::Duration;

use pagewright::testing::RecordingTransport;
use pagewright::{
    init, EventOutcome, FormState, InMemoryPage, Key, ModalCatalog, ModalRecord, NodeId,
    PageEvent, PageRuntime, PageSurface, RuntimeConfig, Variant,
};

const LANDING_PAGE: &str = include_str!("../fixtures/landing_page.json");
const PROJECTS: &str = include_str!("../fixtures/projects.json");

/// Page runtime under test, driven through host events only
#[derive(World)]
#[world(init = Self::new)]
pub struct PageWorld {
    /// Runtime over the landing page fixture
    pub runtime: Option<PageRuntime<InMemoryPage>>,

    /// Scripted transport shared with the runtime
    pub transport: Arc<RecordingTransport>,

    /// Config used the next time the page is loaded
    pub config: RuntimeConfig,

    /// Outcome of the most recent dispatched event
    pub last_outcome: Option<EventOutcome>,

    /// Reveal target added after the page was loaded
    pub late_element: Option<NodeId>,

    /// Navbar scrolled-class transitions observed while scrolling
    pub chrome_transitions: usize,

    /// Form field added after the page was loaded
    pub extra_field: Option<NodeId>,
}

impl std::fmt::Debug for PageWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageWorld")
            .field("loaded", &self.runtime.is_some())
            .field("last_outcome", &self.last_outcome)
            .field("late_element", &self.late_element)
            .field("chrome_transitions", &self.chrome_transitions)
            .field("extra_field", &self.extra_field)
            .finish()
    }
}

impl PageWorld {
    pub fn new() -> Self {
        Self {
            runtime: None,
            transport: RecordingTransport::succeeding(),
            config: RuntimeConfig::for_variant(Variant::Redesign),
            last_outcome: None,
            late_element: None,
            chrome_transitions: 0,
            extra_field: None,
        }
    }

    /// Build the runtime over a fresh copy of the landing page
    pub fn load_page(&mut self) {
        let page = InMemoryPage::from_json(LANDING_PAGE).expect("landing page fixture");
        let catalog = ModalCatalog::from_json(PROJECTS).expect("project catalog fixture");
        let runtime = init(page, self.config.clone(), self.transport.clone())
            .expect("runtime initialization")
            .with_modal_catalog(catalog);
        self.runtime = Some(runtime);
    }

    /// Record from the project catalog fixture
    pub fn project(&self, key: &str) -> ModalRecord {
        ModalCatalog::from_json(PROJECTS)
            .expect("project catalog fixture")
            .get(key)
            .cloned()
            .unwrap_or_else(|| panic!("no project '{key}' in catalog"))
    }

    /// State of the consultation form
    pub fn form_state(&self) -> &FormState {
        let form = self.element("consultation");
        self.runtime().form_state(form).expect("form is managed")
    }

    pub fn runtime(&self) -> &PageRuntime<InMemoryPage> {
        self.runtime.as_ref().expect("page not loaded")
    }

    pub fn runtime_mut(&mut self) -> &mut PageRuntime<InMemoryPage> {
        self.runtime.as_mut().expect("page not loaded")
    }

    pub fn page(&self) -> &InMemoryPage {
        self.runtime().page()
    }

    /// Element carrying the given `id`
    pub fn element(&self, id: &str) -> NodeId {
        self.page()
            .element_by_id(id)
            .unwrap_or_else(|| panic!("no element with id '{id}'"))
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        let node = self.element(id);
        self.page().has_class(node, class)
    }

    pub async fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        let outcome = self.runtime_mut().dispatch(event).await;
        self.last_outcome = Some(outcome);
        outcome
    }

    /// Let the throttle cool down, move the viewport, and fire one scroll event
    pub async fn scroll_to(&mut self, position: u32) {
        let interval = self.config.throttle_interval();
        self.runtime_mut().advance(interval);
        self.scroll_without_waiting(position).await;
    }

    /// Fire one scroll event at the current clock
    pub async fn scroll_without_waiting(&mut self, position: u32) {
        let was_scrolled = self.has_class("navbar", "scrolled");
        self.runtime_mut().page_mut().set_scroll_position(position);
        self.dispatch(PageEvent::Scroll).await;
        if self.has_class("navbar", "scrolled") != was_scrolled {
            self.chrome_transitions += 1;
        }
    }

    pub async fn click(&mut self, id: &str) -> EventOutcome {
        let target = self.element(id);
        self.dispatch(PageEvent::Click { target }).await
    }

    pub async fn press(&mut self, key: &str, target: Option<&str>) -> EventOutcome {
        let target = target.map(|id| self.element(id));
        self.dispatch(PageEvent::KeyDown {
            key: Key::from_dom(key),
            target,
        })
        .await
    }

    pub fn advance_ms(&mut self, millis: u64) {
        self.runtime_mut().advance(Duration::from_millis(millis));
    }
}

impl Default for PageWorld {
    fn default() -> Self {
        Self::new()
    }
}
