// ============================================================================
// ACADEMIC VIEWMODEL - years, terms, subjects, classrooms (one tab each)
// ============================================================================
// Only the active tab is fetched. The terms tab needs a year: with none
// selected it first loads the years and picks the current one.
// ============================================================================

use crate::models::{
    AcademicYear, Classroom, NewAcademicYear, NewClassroom, NewSubject, NewTerm, Subject, Term,
};
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::action::{report, ActionError};
use crate::viewmodels::resource_loader::{ListView, ResourceLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcademicTab {
    #[default]
    Years,
    Terms,
    Subjects,
    Classrooms,
}

impl AcademicTab {
    pub const ALL: [AcademicTab; 4] = [
        AcademicTab::Years,
        AcademicTab::Terms,
        AcademicTab::Subjects,
        AcademicTab::Classrooms,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AcademicTab::Years => "Academic Years",
            AcademicTab::Terms => "Terms",
            AcademicTab::Subjects => "Subjects",
            AcademicTab::Classrooms => "Classrooms",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            AcademicTab::Years => "No academic years found. Create one to get started.",
            AcademicTab::Terms => "No terms found for this academic year.",
            AcademicTab::Subjects => "No subjects found. Add your first subject.",
            AcademicTab::Classrooms => "No classrooms found. Add your first classroom.",
        }
    }
}

#[derive(Clone)]
pub struct AcademicViewModel {
    ctx: AppContext,
    tab: ReactiveState<AcademicTab>,
    selected_year: ReactiveState<Option<String>>,
    years: ResourceLoader<Vec<AcademicYear>>,
    terms: ResourceLoader<Vec<Term>>,
    subjects: ResourceLoader<Vec<Subject>>,
    classrooms: ResourceLoader<Vec<Classroom>>,
}

impl AcademicViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            tab: ReactiveState::default(),
            selected_year: ReactiveState::new(None),
            years: ResourceLoader::new(),
            terms: ResourceLoader::new(),
            subjects: ResourceLoader::new(),
            classrooms: ResourceLoader::new(),
        }
    }

    pub fn tab(&self) -> AcademicTab {
        self.tab.get()
    }

    pub async fn select_tab(&self, tab: AcademicTab) {
        self.tab.set(tab);
        self.load().await;
    }

    /// Fetch whatever the active tab shows
    pub async fn load(&self) {
        let api = &self.ctx.api;
        match self.tab.get() {
            AcademicTab::Years => {
                self.years.load(api.academic_years()).await;
            }
            AcademicTab::Terms => self.load_terms().await,
            AcademicTab::Subjects => {
                self.subjects.load(api.subjects()).await;
            }
            AcademicTab::Classrooms => {
                self.classrooms.load(api.classrooms()).await;
            }
        }
    }

    pub async fn select_year(&self, year_id: &str) {
        self.selected_year.set(Some(year_id.to_string()));
        if self.tab.get() == AcademicTab::Terms {
            self.load_terms().await;
        }
    }

    pub fn selected_year(&self) -> Option<String> {
        self.selected_year.get()
    }

    async fn load_terms(&self) {
        if self.selected_year.with(Option::is_none) {
            self.years.load(self.ctx.api.academic_years()).await;
            if self.selected_year.with(Option::is_some) {
                // select_year() ran meanwhile and already fetched its terms
                log::debug!("⏭️ Year chosen while years were loading, keeping it");
                return;
            }
            if let Some(message) = self.years.error() {
                self.terms.fail(message);
                return;
            }

            let years = self.years.data().unwrap_or_default();
            match AcademicYear::pick_current(&years) {
                Some(year) => self.selected_year.set(Some(year.id.clone())),
                None => {
                    log::info!("ℹ️ No academic years yet, nothing to list in terms");
                    self.terms.set_loaded(Vec::new());
                    return;
                }
            }
        }

        let Some(year_id) = self.selected_year.get() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.terms
            .load(async move { api.terms(&year_id).await })
            .await;
    }

    // ----- lists -----

    pub fn years(&self) -> ListView<AcademicYear> {
        self.years
            .list_view(AcademicTab::Years.empty_message(), |_| true)
    }

    pub fn terms(&self) -> ListView<Term> {
        self.terms
            .list_view(AcademicTab::Terms.empty_message(), |_| true)
    }

    pub fn subjects(&self) -> ListView<Subject> {
        self.subjects
            .list_view(AcademicTab::Subjects.empty_message(), |_| true)
    }

    pub fn classrooms(&self) -> ListView<Classroom> {
        self.classrooms
            .list_view(AcademicTab::Classrooms.empty_message(), |_| true)
    }

    // ----- creation -----

    pub async fn create_year(&self, year: NewAcademicYear) -> Result<AcademicYear, ActionError> {
        let result = self.submit_year(&year).await;
        self.after_create(result, "Academic year created", AcademicTab::Years)
            .await
    }

    pub async fn create_term(&self, term: NewTerm) -> Result<Term, ActionError> {
        let result = self.submit_term(&term).await;
        self.after_create(result, "Term created", AcademicTab::Terms)
            .await
    }

    pub async fn create_subject(&self, subject: NewSubject) -> Result<Subject, ActionError> {
        let result = self.submit_subject(&subject).await;
        self.after_create(result, "Subject created", AcademicTab::Subjects)
            .await
    }

    pub async fn create_classroom(&self, classroom: NewClassroom) -> Result<Classroom, ActionError> {
        let result = self.submit_classroom(&classroom).await;
        self.after_create(result, "Classroom created", AcademicTab::Classrooms)
            .await
    }

    async fn submit_year(&self, year: &NewAcademicYear) -> Result<AcademicYear, ActionError> {
        require_name(&year.name)?;
        if year.end_date <= year.start_date {
            return Err(ActionError::Rejected("End date must be after the start date"));
        }
        Ok(self.ctx.api.create_academic_year(year).await?)
    }

    async fn submit_term(&self, term: &NewTerm) -> Result<Term, ActionError> {
        require_name(&term.name)?;
        if term.academic_year_id.trim().is_empty() {
            return Err(ActionError::Rejected("Select an academic year first"));
        }
        Ok(self.ctx.api.create_term(term).await?)
    }

    async fn submit_subject(&self, subject: &NewSubject) -> Result<Subject, ActionError> {
        require_name(&subject.name)?;
        Ok(self.ctx.api.create_subject(subject).await?)
    }

    async fn submit_classroom(&self, classroom: &NewClassroom) -> Result<Classroom, ActionError> {
        require_name(&classroom.name)?;
        Ok(self.ctx.api.create_classroom(classroom).await?)
    }

    async fn after_create<T>(
        &self,
        result: Result<T, ActionError>,
        success: &str,
        tab: AcademicTab,
    ) -> Result<T, ActionError> {
        let result = report(&self.ctx.notifications, result, success);
        if result.is_ok() && self.tab.get() == tab {
            self.load().await;
        }
        result
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.tab.subscribe(callback.clone());
        self.selected_year.subscribe(callback.clone());
        self.years.subscribe(callback.clone());
        self.terms.subscribe(callback.clone());
        self.subjects.subscribe(callback.clone());
        self.classrooms.subscribe(callback);
    }
}

fn require_name(name: &str) -> Result<(), ActionError> {
    if name.trim().is_empty() {
        Err(ActionError::Rejected("Name is required"))
    } else {
        Ok(())
    }
}
