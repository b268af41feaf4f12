use crate::constants::{ACTIVE_CLASS, TAB_BUTTON_SELECTOR, TAB_PAGE_SELECTOR};
use crate::dom;
use web_sys as web;

/// Application sections reachable from the dial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Tuner,
    Courses,
    Instruments,
    Ranking,
}

impl Section {
    /// Compass classes the target buttons carry, in lookup order.
    const BY_CLASS: [(&'static str, Section); 4] = [
        ("norte", Section::Tuner),
        ("sul", Section::Courses),
        ("sudoeste", Section::Instruments),
        ("oeste", Section::Ranking),
    ];

    /// Section a target button leads to, judged by its classes.
    pub fn for_button(button: &web::Element) -> Option<Self> {
        let cl = button.class_list();
        Self::BY_CLASS
            .iter()
            .find(|(class, _)| cl.contains(class))
            .map(|&(_, section)| section)
    }

    /// Tab id (`data-tab` / page element id) of the section.
    pub fn tab_id(self) -> &'static str {
        match self {
            Section::Tuner => "afinador",
            Section::Courses => "cursos",
            Section::Instruments => "instrumentos",
            Section::Ranking => "ranking",
        }
    }
}

pub fn go_to_section(section: Section) {
    if let Some(document) = dom::window_document() {
        log::info!("[nav] -> {}", section.tab_id());
        switch_tab(&document, section.tab_id());
    }
}

/// Mark the tab button and page for `tab_id` active and everything else inactive.
pub fn switch_tab(document: &web::Document, tab_id: &str) {
    for el in dom::query_all(document, TAB_BUTTON_SELECTOR)
        .into_iter()
        .chain(dom::query_all(document, TAB_PAGE_SELECTOR))
    {
        _ = el.class_list().remove_1(ACTIVE_CLASS);
    }
    let button_selector = format!("{}[data-tab=\"{}\"]", TAB_BUTTON_SELECTOR, tab_id);
    if let Ok(Some(button)) = document.query_selector(&button_selector) {
        _ = button.class_list().add_1(ACTIVE_CLASS);
    }
    match document.get_element_by_id(tab_id) {
        Some(page) => {
            _ = page.class_list().add_1(ACTIVE_CLASS);
        }
        None => log::warn!("[nav] no page for tab {}", tab_id),
    }
}

/// Plain tab buttons switch directly via their `data-tab` attribute.
pub fn wire_tab_buttons(document: &web::Document) {
    for button in dom::query_all(document, TAB_BUTTON_SELECTOR) {
        let Some(tab_id) = button.get_attribute("data-tab") else {
            continue;
        };
        let doc = document.clone();
        dom::add_click_listener(&button, move || switch_tab(&doc, &tab_id));
    }
}
