use crate::models::{AcademicYear, Classroom, NewAcademicYear, NewClassroom, NewSubject, NewTerm, Subject, Term};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;

impl ApiClient {
    pub async fn academic_years(&self) -> Result<Vec<AcademicYear>, ApiError> {
        self.get("/academic/years").await
    }

    pub async fn terms(&self, year_id: &str) -> Result<Vec<Term>, ApiError> {
        self.get(&format!("/academic/terms?year_id={}", year_id)).await
    }

    pub async fn classrooms(&self) -> Result<Vec<Classroom>, ApiError> {
        self.get("/academic/classrooms").await
    }

    pub async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.get("/subjects/").await
    }

    pub async fn create_academic_year(&self, year: &NewAcademicYear) -> Result<AcademicYear, ApiError> {
        self.post("/academic/years", year).await
    }

    pub async fn create_term(&self, term: &NewTerm) -> Result<Term, ApiError> {
        self.post("/academic/terms", term).await
    }

    pub async fn create_classroom(&self, classroom: &NewClassroom) -> Result<Classroom, ApiError> {
        self.post("/academic/classrooms", classroom).await
    }

    pub async fn create_subject(&self, subject: &NewSubject) -> Result<Subject, ApiError> {
        self.post("/subjects/", subject).await
    }

    /// Current year, then its active term (either falls back to the first listed)
    pub async fn current_term(&self) -> Result<Option<Term>, ApiError> {
        let years = self.academic_years().await?;
        let Some(year) = AcademicYear::pick_current(&years) else {
            return Ok(None);
        };
        let terms = self.terms(&year.id).await?;
        Ok(Term::pick_active(&terms).cloned())
    }
}
