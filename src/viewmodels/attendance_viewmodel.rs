// ============================================================================
// ATTENDANCE VIEWMODEL - daily register for one classroom
// ============================================================================
// Filters: date (today by default) + classroom. Changing either drops unsaved
// marks and re-fetches the roster; every fresh roster starts all present.
// Aggregates are derived from the rows on every read, never stored.
// ============================================================================

use chrono::NaiveDate;

use crate::models::{
    attendance_rate, AttendanceBulkRequest, AttendanceMark, AttendanceStatus, Classroom, Student, Term,
};
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::action::{report, ActionError};
use crate::viewmodels::resource_loader::{ListView, ResourceLoader};

pub const EMPTY_ROSTER: &str = "No students enrolled in this classroom.";
pub const NO_CLASSROOM: &str = "Select a classroom to take attendance.";

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub student: Student,
    pub status: AttendanceStatus,
    pub remarks: String,
}

impl AttendanceRow {
    fn fresh(student: Student) -> Self {
        Self {
            student,
            status: AttendanceStatus::default(),
            remarks: String::new(),
        }
    }

    fn to_mark(&self) -> AttendanceMark {
        let remarks = self.remarks.trim();
        AttendanceMark {
            student_id: self.student.id.clone(),
            status: self.status,
            remarks: (!remarks.is_empty()).then(|| remarks.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AttendanceViewModel {
    ctx: AppContext,
    classrooms: ResourceLoader<Vec<Classroom>>,
    term: ReactiveState<Option<Term>>,
    roster: ResourceLoader<Vec<AttendanceRow>>,
    classroom_id: ReactiveState<Option<String>>,
    date: ReactiveState<NaiveDate>,
    saving: ReactiveState<bool>,
}

impl AttendanceViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self::with_date(ctx, chrono::Local::now().date_naive())
    }

    pub fn with_date(ctx: AppContext, date: NaiveDate) -> Self {
        Self {
            ctx,
            classrooms: ResourceLoader::new(),
            term: ReactiveState::new(None),
            roster: ResourceLoader::new(),
            classroom_id: ReactiveState::new(None),
            date: ReactiveState::new(date),
            saving: ReactiveState::new(false),
        }
    }

    /// Classrooms and the current term, side by side
    pub async fn load(&self) {
        let api = self.ctx.api.clone();
        let (_, term) = futures::join!(self.classrooms.load(api.classrooms()), api.current_term());

        match term {
            Ok(term) => {
                if term.is_none() {
                    log::warn!("⚠️ No academic term configured");
                }
                self.term.set(term);
            }
            Err(e) => {
                log::warn!("⚠️ Could not resolve current term: {}", e);
                self.term.set(None);
            }
        }
    }

    pub async fn select_classroom(&self, classroom_id: &str) {
        let id = classroom_id.trim();
        self.classroom_id
            .set((!id.is_empty()).then(|| id.to_string()));
        self.reload_roster().await;
    }

    pub async fn select_date(&self, date: NaiveDate) {
        self.date.set(date);
        self.reload_roster().await;
    }

    pub async fn reload_roster(&self) {
        let Some(classroom_id) = self.classroom_id.get() else {
            self.roster.reset();
            return;
        };

        log::info!("📋 Loading roster for classroom {} on {}", classroom_id, self.date.get());
        let api = self.ctx.api.clone();
        self.roster
            .load(async move {
                api.students(Some(&classroom_id))
                    .await
                    .map(|students| students.into_iter().map(AttendanceRow::fresh).collect())
            })
            .await;
    }

    /// Flip present/absent. False when the student is not on the roster.
    pub fn toggle(&self, student_id: &str) -> bool {
        self.edit_row(student_id, |row| row.status = row.status.toggled())
    }

    pub fn set_remarks(&self, student_id: &str, remarks: &str) -> bool {
        self.edit_row(student_id, |row| row.remarks = remarks.to_string())
    }

    pub async fn save(&self) -> Result<(), ActionError> {
        let result = self.submit().await;
        report(&self.ctx.notifications, result, "Attendance saved successfully")
    }

    async fn submit(&self) -> Result<(), ActionError> {
        if self.saving.get() {
            return Err(ActionError::Rejected("Attendance is already being saved"));
        }
        let request = self.build_request()?;

        self.saving.set(true);
        log::info!(
            "💾 Saving attendance for {} students ({})",
            request.attendance_data.len(),
            request.date
        );
        let result = self.ctx.api.submit_attendance(&request).await;
        self.saving.set(false);

        result.map(|_| ()).map_err(ActionError::from)
    }

    fn build_request(&self) -> Result<AttendanceBulkRequest, ActionError> {
        let classroom_id = self
            .classroom_id
            .get()
            .ok_or(ActionError::Rejected("Select a classroom first"))?;

        let rows = self.roster.data().unwrap_or_default();
        if rows.is_empty() {
            return Err(ActionError::Rejected("There are no students to mark"));
        }

        let term = self
            .term
            .get()
            .ok_or(ActionError::Rejected("No active academic term found"))?;

        Ok(AttendanceBulkRequest {
            classroom_id,
            term_id: term.id,
            date: self.date.get(),
            attendance_data: rows.iter().map(AttendanceRow::to_mark).collect(),
        })
    }

    fn edit_row<F>(&self, student_id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut AttendanceRow),
    {
        let mut found = false;
        self.roster.modify(|rows| {
            if let Some(row) = rows.iter_mut().find(|row| row.student.id == student_id) {
                edit(row);
                found = true;
            }
        });
        found
    }

    // ----- reads -----

    pub fn classrooms(&self) -> &ResourceLoader<Vec<Classroom>> {
        &self.classrooms
    }

    pub fn term(&self) -> Option<Term> {
        self.term.get()
    }

    pub fn selected_classroom(&self) -> Option<String> {
        self.classroom_id.get()
    }

    pub fn date(&self) -> NaiveDate {
        self.date.get()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    pub fn rows(&self) -> ListView<AttendanceRow> {
        if self.classroom_id.with(Option::is_none) {
            return ListView::Empty(NO_CLASSROOM);
        }
        self.roster.list_view(EMPTY_ROSTER, |_| true)
    }

    pub fn status_of(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.roster
            .data()?
            .into_iter()
            .find(|row| row.student.id == student_id)
            .map(|row| row.status)
    }

    pub fn present_count(&self) -> usize {
        self.count(AttendanceStatus::Present)
    }

    pub fn absent_count(&self) -> usize {
        self.count(AttendanceStatus::Absent)
    }

    pub fn total(&self) -> usize {
        self.roster.len()
    }

    pub fn rate(&self) -> u32 {
        attendance_rate(self.present_count(), self.total())
    }

    fn count(&self, status: AttendanceStatus) -> usize {
        self.roster
            .data()
            .map(|rows| rows.iter().filter(|row| row.status == status).count())
            .unwrap_or(0)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.classrooms.subscribe(callback.clone());
        self.roster.subscribe(callback.clone());
        self.term.subscribe(callback.clone());
        self.classroom_id.subscribe(callback.clone());
        self.date.subscribe(callback.clone());
        self.saving.subscribe(callback);
    }
}
