// ============================================================================
// GRADES VIEWMODEL - assessments and bulk mark entry
// ============================================================================

use crate::models::{
    Assessment, Classroom, GradeBulkRequest, GradeEntry, NewAssessment, Student, Subject, Term,
};
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::action::{report, ActionError};
use crate::viewmodels::resource_loader::{ListView, ResourceLoader};

pub const EMPTY_ASSESSMENTS: &str = "No assessments yet. Create one to start entering grades.";
pub const EMPTY_MARKSHEET: &str = "No students enrolled in this classroom.";

pub const ASSESSMENT_KINDS: [&str; 4] = ["exam", "quiz", "assignment", "practical"];

#[derive(Debug, Clone, PartialEq)]
pub struct MarkRow {
    pub student: Student,
    pub marks: Option<f64>,
    pub remarks: String,
}

#[derive(Clone)]
pub struct GradesViewModel {
    ctx: AppContext,
    classrooms: ResourceLoader<Vec<Classroom>>,
    subjects: ResourceLoader<Vec<Subject>>,
    term: ReactiveState<Option<Term>>,
    assessments: ReactiveState<Vec<Assessment>>,
    selected: ReactiveState<Option<Assessment>>,
    marksheet: ResourceLoader<Vec<MarkRow>>,
    submitting: ReactiveState<bool>,
}

impl GradesViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            classrooms: ResourceLoader::new(),
            subjects: ResourceLoader::new(),
            term: ReactiveState::new(None),
            assessments: ReactiveState::default(),
            selected: ReactiveState::new(None),
            marksheet: ResourceLoader::new(),
            submitting: ReactiveState::new(false),
        }
    }

    /// Classrooms, subjects and the current term for the assessment form
    pub async fn load(&self) {
        let api = self.ctx.api.clone();
        let (_, _, term) = futures::join!(
            self.classrooms.load(api.classrooms()),
            self.subjects.load(api.subjects()),
            api.current_term()
        );
        match term {
            Ok(term) => self.term.set(term),
            Err(e) => log::warn!("⚠️ Could not resolve current term: {}", e),
        }
    }

    pub fn classrooms(&self) -> &ResourceLoader<Vec<Classroom>> {
        &self.classrooms
    }

    pub fn subjects(&self) -> &ResourceLoader<Vec<Subject>> {
        &self.subjects
    }

    pub fn term(&self) -> Option<Term> {
        self.term.get()
    }

    pub fn assessments(&self) -> ListView<Assessment> {
        let assessments = self.assessments.get();
        if assessments.is_empty() {
            ListView::Empty(EMPTY_ASSESSMENTS)
        } else {
            ListView::Rows(assessments)
        }
    }

    /// Sum of weights of the assessments on the page for `term_id`
    pub fn total_weight(&self, term_id: &str) -> f64 {
        self.assessments.with(|list| {
            list.iter()
                .filter(|assessment| assessment.term_id == term_id)
                .map(|assessment| assessment.weight)
                .sum()
        })
    }

    pub async fn create_assessment(&self, assessment: NewAssessment) -> Result<Assessment, ActionError> {
        let result = self.submit_assessment(&assessment).await;
        report(&self.ctx.notifications, result, "Assessment created")
    }

    async fn submit_assessment(&self, assessment: &NewAssessment) -> Result<Assessment, ActionError> {
        if assessment.title.trim().is_empty() {
            return Err(ActionError::Rejected("Title is required"));
        }
        if assessment.classroom_id.is_empty() || assessment.subject_id.is_empty() {
            return Err(ActionError::Rejected("Select a classroom and a subject"));
        }
        if assessment.term_id.is_empty() {
            return Err(ActionError::Rejected("No active academic term found"));
        }
        if !(assessment.total_marks > 0.0) {
            return Err(ActionError::Rejected("Total marks must be greater than zero"));
        }
        if !(0.0..=100.0).contains(&assessment.weight) {
            return Err(ActionError::Rejected("Weight must be between 0 and 100"));
        }

        let created = self.ctx.api.create_assessment(assessment).await?;
        self.assessments.update(|list| list.push(created.clone()));
        Ok(created)
    }

    /// Select an assessment and load its classroom into a blank marksheet
    pub async fn open_assessment(&self, assessment_id: &str) {
        let found = self
            .assessments
            .with(|list| list.iter().find(|a| a.id == assessment_id).cloned());
        let Some(assessment) = found else {
            log::warn!("⚠️ Unknown assessment {}", assessment_id);
            return;
        };

        let classroom_id = assessment.classroom_id.clone();
        self.selected.set(Some(assessment));
        let api = self.ctx.api.clone();
        self.marksheet
            .load(async move {
                api.students(Some(&classroom_id)).await.map(|students| {
                    students
                        .into_iter()
                        .map(|student| MarkRow {
                            student,
                            marks: None,
                            remarks: String::new(),
                        })
                        .collect()
                })
            })
            .await;
    }

    pub fn selected(&self) -> Option<Assessment> {
        self.selected.get()
    }

    pub fn marksheet(&self) -> ListView<MarkRow> {
        self.marksheet.list_view(EMPTY_MARKSHEET, |_| true)
    }

    /// `None` clears the entry. False when out of range or the student is unknown.
    pub fn set_marks(&self, student_id: &str, marks: Option<f64>) -> bool {
        let Some(total) = self.selected.with(|s| s.as_ref().map(|a| a.total_marks)) else {
            return false;
        };
        if let Some(value) = marks {
            if !(0.0..=total).contains(&value) {
                return false;
            }
        }

        let mut found = false;
        self.marksheet.modify(|rows| {
            if let Some(row) = rows.iter_mut().find(|row| row.student.id == student_id) {
                row.marks = marks;
                found = true;
            }
        });
        found
    }

    pub fn set_remarks(&self, student_id: &str, remarks: &str) -> bool {
        let mut found = false;
        self.marksheet.modify(|rows| {
            if let Some(row) = rows.iter_mut().find(|row| row.student.id == student_id) {
                row.remarks = remarks.to_string();
                found = true;
            }
        });
        found
    }

    pub async fn submit_grades(&self) -> Result<usize, ActionError> {
        let result = self.submit_marksheet().await;
        report(&self.ctx.notifications, result, "Grades saved successfully")
    }

    async fn submit_marksheet(&self) -> Result<usize, ActionError> {
        let assessment = self
            .selected
            .get()
            .ok_or(ActionError::Rejected("Select an assessment first"))?;

        let grades: Vec<GradeEntry> = self
            .marksheet
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| {
                let remarks = row.remarks.trim().to_string();
                row.marks.map(|marks_obtained| GradeEntry {
                    student_id: row.student.id,
                    marks_obtained,
                    remarks: (!remarks.is_empty()).then_some(remarks),
                })
            })
            .collect();
        if grades.is_empty() {
            return Err(ActionError::Rejected("Enter at least one mark"));
        }
        if self.submitting.get() {
            return Err(ActionError::Rejected("Grades are already being saved"));
        }

        let request = GradeBulkRequest {
            assessment_id: assessment.id,
            grades,
        };
        self.submitting.set(true);
        let result = self.ctx.api.submit_grades(&request).await;
        self.submitting.set(false);
        result?;
        Ok(request.grades.len())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.classrooms.subscribe(callback.clone());
        self.subjects.subscribe(callback.clone());
        self.term.subscribe(callback.clone());
        self.assessments.subscribe(callback.clone());
        self.selected.subscribe(callback.clone());
        self.marksheet.subscribe(callback.clone());
        self.submitting.subscribe(callback);
    }
}
