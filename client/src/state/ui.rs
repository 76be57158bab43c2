//! Local UI chrome state (active tab, list vs. detail view).
//!
//! DESIGN
//! ======
//! Keeps navigation out of the domain reducers (`CaseStore`,
//! `DocumentPipeline`) so the pages can switch views without touching
//! fetched data or pipeline progress.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use docket::Case;

/// The two top-level screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    /// Case list, search, add form and detail view.
    #[default]
    Cases,
    /// Document upload, summary and legal query.
    Rag,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Cases, Tab::Rag];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cases => "Legal Case",
            Self::Rag => "RAG System",
        }
    }
}

/// What the cases tab is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CaseView {
    #[default]
    List,
    /// Detail of one case, as it was when opened.
    Detail(Case),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub tab: Tab,
    pub case_view: CaseView,
}

impl UiState {
    /// Switch tabs. Returns `true` when the case list should be refetched,
    /// which is every time the cases tab is chosen.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        self.tab = tab;
        tab == Tab::Cases
    }

    pub fn open_case(&mut self, case: Case) {
        self.case_view = CaseView::Detail(case);
    }

    pub fn back_to_list(&mut self) {
        self.case_view = CaseView::List;
    }

    #[must_use]
    pub fn selected_case(&self) -> Option<&Case> {
        match &self.case_view {
            CaseView::List => None,
            CaseView::Detail(case) => Some(case),
        }
    }
}
