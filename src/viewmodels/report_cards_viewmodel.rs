// ============================================================================
// REPORT CARDS VIEWMODEL - per-student PDF links for one term
// ============================================================================

use crate::models::{AcademicYear, Classroom, Student, Term};
use crate::services::{ApiClient, ApiError};
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::resource_loader::{ListView, ResourceLoader};

pub const EMPTY_REPORTS: &str = "No students found for this classroom.";
pub const NO_SELECTION: &str = "Select a classroom and term to list report cards.";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCardLink {
    pub student: Student,
    pub url: String,
}

/// Terms of the current academic year
async fn fetch_terms(api: ApiClient) -> Result<Vec<Term>, ApiError> {
    let years = api.academic_years().await?;
    match AcademicYear::pick_current(&years) {
        Some(year) => api.terms(&year.id).await,
        None => Ok(Vec::new()),
    }
}

#[derive(Clone)]
pub struct ReportCardsViewModel {
    ctx: AppContext,
    classrooms: ResourceLoader<Vec<Classroom>>,
    terms: ResourceLoader<Vec<Term>>,
    term_id: ReactiveState<Option<String>>,
    classroom_id: ReactiveState<Option<String>>,
    roster: ResourceLoader<Vec<Student>>,
    query: ReactiveState<String>,
}

impl ReportCardsViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            classrooms: ResourceLoader::new(),
            terms: ResourceLoader::new(),
            term_id: ReactiveState::new(None),
            classroom_id: ReactiveState::new(None),
            roster: ResourceLoader::new(),
            query: ReactiveState::default(),
        }
    }

    /// Classrooms and terms; the active term is preselected
    pub async fn load(&self) {
        let api = self.ctx.api.clone();
        futures::join!(
            self.classrooms.load(api.classrooms()),
            self.terms.load(fetch_terms(api.clone()))
        );

        if self.term_id.with(Option::is_none) {
            let terms = self.terms.data().unwrap_or_default();
            if let Some(term) = Term::pick_active(&terms) {
                self.term_id.set(Some(term.id.clone()));
            }
        }
    }

    pub fn classrooms(&self) -> &ResourceLoader<Vec<Classroom>> {
        &self.classrooms
    }

    pub fn terms(&self) -> &ResourceLoader<Vec<Term>> {
        &self.terms
    }

    pub fn selected_term(&self) -> Option<String> {
        self.term_id.get()
    }

    /// Links are rebuilt from the term on read, so no refetch is needed
    pub fn select_term(&self, term_id: &str) {
        self.term_id.set(Some(term_id.to_string()));
    }

    pub async fn select_classroom(&self, classroom_id: &str) {
        self.classroom_id.set(Some(classroom_id.to_string()));
        let api = self.ctx.api.clone();
        let id = classroom_id.to_string();
        self.roster
            .load(async move { api.students(Some(&id)).await })
            .await;
    }

    pub fn set_query(&self, query: &str) {
        self.query.set(query.to_string());
    }

    pub fn rows(&self) -> ListView<ReportCardLink> {
        let Some(term_id) = self.term_id.get() else {
            return ListView::Empty(NO_SELECTION);
        };
        if self.classroom_id.with(Option::is_none) {
            return ListView::Empty(NO_SELECTION);
        }

        let query = self.query.get();
        match self.roster.list_view(EMPTY_REPORTS, |student| student.matches(&query)) {
            ListView::Rows(students) => ListView::Rows(
                students
                    .into_iter()
                    .map(|student| ReportCardLink {
                        url: self.ctx.api.report_card_url(&student.id, &term_id),
                        student,
                    })
                    .collect(),
            ),
            ListView::Loading => ListView::Loading,
            ListView::Error(message) => ListView::Error(message),
            ListView::Empty(message) => ListView::Empty(message),
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.classrooms.subscribe(callback.clone());
        self.terms.subscribe(callback.clone());
        self.term_id.subscribe(callback.clone());
        self.classroom_id.subscribe(callback.clone());
        self.roster.subscribe(callback.clone());
        self.query.subscribe(callback);
    }
}
