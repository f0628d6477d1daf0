//! XPath templates for the listing pages
//!
//! Every element the crawler touches is found by a substring of its
//! server-generated id (or title), so all locators are built by substituting
//! labels from [`KindProfile`] into the fixed templates below.

use std::fmt;

use crate::models::entity_kind::KindProfile;

/// Search button that reloads the listing for the selected filters
const SEARCH_XPATH: &str = r#"//input[@value="Pesquisar"]"#;

/// Span holding "N Resultados encontrados"
const RESULTS_XPATH: &str = r#"//span[contains(@id, "lblResults")]"#;

/// Row class of the pager under the results grid
const PAGER_LABEL: &str = "ARLabel";

/// Wrapper around the grid token used as the `__doPostBack` target
const PAGER_ID_TEMPLATE: &str = "ctl00$ctl43${}$ctl00$gvResults";

/// An XPath expression selecting zero or more elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn select_options(select_label: &str, predicate: &str) -> Locator {
    Locator::xpath(format!(
        r#"//select[contains(@id, "{}")]/option{}"#,
        select_label, predicate
    ))
}

pub fn search_button() -> Locator {
    Locator::xpath(SEARCH_XPATH)
}

pub fn results_counter() -> Locator {
    Locator::xpath(RESULTS_XPATH)
}

/// The pager cell for the current page is the only one rendered as a span
pub fn current_page(page_number: u32) -> Locator {
    Locator::xpath(format!(
        r#"//tr[@class="{}"]//tr/td/span[text()="{}"]"#,
        PAGER_LABEL, page_number
    ))
}

impl KindProfile {
    pub fn legislature_option(&self, legislature: &str) -> Locator {
        select_options(
            self.legislature_label,
            &format!(r#"[@value="{}"]"#, legislature),
        )
    }

    pub fn legislature_options(&self) -> Locator {
        select_options(self.legislature_label, r#"[@value!=""]"#)
    }

    pub fn selected_legislature(&self) -> Locator {
        select_options(self.legislature_label, "[@selected]")
    }

    /// "All sessions" entry of the session filter
    pub fn empty_session_option(&self) -> Option<Locator> {
        self.session_label
            .map(|label| select_options(label, r#"[@value=""]"#))
    }

    pub fn id_links(&self) -> Locator {
        Locator::xpath(format!(r#"//a[contains(@id, "{}")]"#, self.id_label))
    }

    pub fn number_links(&self) -> Option<Locator> {
        self.number_label
            .map(|label| Locator::xpath(format!(r#"//a[contains(@title, "{}")]"#, label)))
    }

    pub fn pager_id(&self) -> String {
        PAGER_ID_TEMPLATE.replace("{}", self.pager_token)
    }

    /// Script asking the grid to render `page_number`
    pub fn page_postback(&self, page_number: u32) -> String {
        format!("__doPostBack('{}','Page${}')", self.pager_id(), page_number)
    }
}
