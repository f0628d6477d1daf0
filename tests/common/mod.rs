//! In-memory listing site implementing `PageDriver`
//!
//! Models just enough of the listing page: a legislature selector, an
//! optional session selector, a search button, a results counter and a
//! paged grid driven by `__doPostBack`. Waits never sleep; a condition that
//! does not hold yields a timeout straight away.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value as JsonValue;

use parliament_ids::error::{DriverError, DriverResult};
use parliament_ids::models::locators;
use parliament_ids::{Element, EntityKind, Locator, PageDriver};

pub struct FakeLegislature {
    pub name: String,
    pub counter: String,
    /// Rows per page as (token, session number)
    pub pages: Vec<Vec<(String, String)>>,
    pub fail_search: bool,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub navigations: Vec<String>,
    pub selected: Option<String>,
    pub session_cleared: bool,
    pub searched: bool,
    pub page: u32,
    pub scripts: Vec<String>,
    pub searches: Vec<String>,
}

pub struct FakeSite {
    kind: EntityKind,
    legislatures: Vec<FakeLegislature>,
    state: Mutex<FakeState>,
}

enum Target {
    AllOptions,
    SelectedOption,
    Option(String),
    EmptySession,
    Search,
    Counter,
    CurrentPage(u32),
    IdLinks,
    NumberLinks,
    Unknown,
}

fn timeout(locator: &Locator) -> DriverError {
    DriverError::Timeout {
        condition: "fake",
        locator: locator.to_string(),
        timeout: Duration::ZERO,
    }
}

impl FakeSite {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            legislatures: Vec::new(),
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Adds a legislature whose pages list plain tokens
    pub fn legislature(self, name: &str, pages: &[&[&str]]) -> Self {
        let pages = pages
            .iter()
            .map(|rows| rows.iter().map(|t| (t.to_string(), "0".to_string())).collect())
            .collect();
        self.push(name, pages)
    }

    /// Adds a legislature whose pages list (token, session number) rows
    pub fn paired_legislature(self, name: &str, pages: &[&[(&str, &str)]]) -> Self {
        let pages = pages
            .iter()
            .map(|rows| {
                rows.iter()
                    .map(|(t, n)| (t.to_string(), n.to_string()))
                    .collect()
            })
            .collect();
        self.push(name, pages)
    }

    fn push(mut self, name: &str, pages: Vec<Vec<(String, String)>>) -> Self {
        let counter = format!("{} Resultados encontrados", pages.len() * 20);
        self.legislatures.push(FakeLegislature {
            name: name.to_string(),
            counter,
            pages,
            fail_search: false,
        });
        self
    }

    pub fn with_counter(mut self, name: &str, counter: &str) -> Self {
        if let Some(leg) = self.legislatures.iter_mut().find(|l| l.name == name) {
            leg.counter = counter.to_string();
        }
        self
    }

    pub fn failing_search(mut self, name: &str) -> Self {
        if let Some(leg) = self.legislatures.iter_mut().find(|l| l.name == name) {
            leg.fail_search = true;
        }
        self
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// The selector marks the last legislature as selected
    fn default_legislature(&self) -> Option<&FakeLegislature> {
        self.legislatures.last()
    }

    fn selected(&self, state: &FakeState) -> Option<&FakeLegislature> {
        let name = state.selected.as_deref()?;
        self.legislatures.iter().find(|l| l.name == name)
    }

    fn recognize(&self, locator: &Locator) -> Target {
        let profile = self.kind.profile();
        if *locator == profile.legislature_options() {
            return Target::AllOptions;
        }
        if *locator == profile.selected_legislature() {
            return Target::SelectedOption;
        }
        if let Some(leg) = self
            .legislatures
            .iter()
            .find(|l| *locator == profile.legislature_option(&l.name))
        {
            return Target::Option(leg.name.clone());
        }
        if profile.empty_session_option().as_ref() == Some(locator) {
            return Target::EmptySession;
        }
        if *locator == locators::search_button() {
            return Target::Search;
        }
        if *locator == locators::results_counter() {
            return Target::Counter;
        }
        if *locator == profile.id_links() {
            return Target::IdLinks;
        }
        if profile.number_links().as_ref() == Some(locator) {
            return Target::NumberLinks;
        }
        let page_re = Regex::new(r#"span\[text\(\)="(\d+)"\]"#).unwrap();
        if let Some(caps) = page_re.captures(locator.as_str()) {
            let n: u32 = caps[1].parse().unwrap();
            if *locator == locators::current_page(n) {
                return Target::CurrentPage(n);
            }
        }
        Target::Unknown
    }

    fn option(value: &str) -> Element {
        Element::new(value).with_attribute("value", value)
    }
}

#[async_trait]
impl PageDriver for FakeSite {
    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.state().navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_until_clickable(&self, locator: &Locator, _timeout: Duration) -> DriverResult<()> {
        let state = self.state();
        match self.recognize(locator) {
            Target::Option(_) | Target::EmptySession => Ok(()),
            Target::Search => match self.selected(&state) {
                Some(leg) if !leg.fail_search => Ok(()),
                _ => Err(timeout(locator)),
            },
            _ => Err(timeout(locator)),
        }
    }

    async fn wait_until_present(&self, locator: &Locator, _timeout: Duration) -> DriverResult<()> {
        let state = self.state();
        match self.recognize(locator) {
            Target::AllOptions if !self.legislatures.is_empty() => Ok(()),
            Target::CurrentPage(n) if state.searched && state.page == n => Ok(()),
            _ => Err(timeout(locator)),
        }
    }

    async fn wait_until_text_present(
        &self,
        locator: &Locator,
        substring: &str,
        _timeout: Duration,
    ) -> DriverResult<()> {
        let state = self.state();
        match (self.recognize(locator), self.selected(&state)) {
            (Target::Counter, Some(leg)) if state.searched && leg.counter.contains(substring) => Ok(()),
            _ => Err(timeout(locator)),
        }
    }

    async fn click(&self, locator: &Locator) -> DriverResult<()> {
        let target = self.recognize(locator);
        let mut state = self.state();
        match target {
            Target::Option(name) => {
                state.selected = Some(name);
                state.searched = false;
                state.session_cleared = false;
            }
            Target::EmptySession => state.session_cleared = true,
            Target::Search => {
                let name = state.selected.clone().ok_or_else(|| timeout(locator))?;
                state.searches.push(name);
                state.searched = true;
                state.page = 1;
            }
            _ => {
                return Err(DriverError::NoSuchElement {
                    locator: locator.to_string(),
                })
            }
        }
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<Element>> {
        let state = self.state();
        let rows = || -> Vec<(String, String)> {
            match self.selected(&state) {
                Some(leg) if state.searched => leg
                    .pages
                    .get(state.page as usize - 1)
                    .cloned()
                    .unwrap_or_default(),
                _ => Vec::new(),
            }
        };

        let found = match self.recognize(locator) {
            Target::AllOptions => self.legislatures.iter().map(|l| Self::option(&l.name)).collect(),
            Target::SelectedOption => self
                .default_legislature()
                .map(|l| vec![Self::option(&l.name)])
                .unwrap_or_default(),
            Target::Counter => match self.selected(&state) {
                Some(leg) if state.searched => vec![Element::new(leg.counter.clone())],
                _ => Vec::new(),
            },
            Target::IdLinks => rows()
                .into_iter()
                .map(|(token, _)| {
                    Element::new("link").with_attribute(
                        "href",
                        format!("http://fake.test/Paginas/Detalhe.aspx?BID={}", token),
                    )
                })
                .collect(),
            Target::NumberLinks => rows()
                .into_iter()
                .map(|(_, number)| Element::new(number))
                .collect(),
            _ => Vec::new(),
        };
        Ok(found)
    }

    async fn run_script(&self, code: &str) -> DriverResult<JsonValue> {
        let pager_id = self.kind.profile().pager_id();
        let mut state = self.state();
        state.scripts.push(code.to_string());

        let re = Regex::new(r"^__doPostBack\('(.+)','Page\$(\d+)'\)$").unwrap();
        let caps = re
            .captures(code)
            .ok_or_else(|| DriverError::Other(format!("unexpected script: {}", code)))?;
        if caps[1] != pager_id {
            return Err(DriverError::Other(format!("unknown pager {}", &caps[1])));
        }
        let page: u32 = caps[2].parse().unwrap();
        let page_exists = self
            .selected(&state)
            .map(|leg| page as usize <= leg.pages.len())
            .unwrap_or(false);
        if state.searched && page_exists {
            state.page = page;
        }
        Ok(JsonValue::Null)
    }
}
