// ============================================================================
// STUDENTS VIEWMODEL - directory with client-side search
// ============================================================================

use crate::models::Student;
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::resource_loader::{ListView, ResourceLoader};

pub const EMPTY_STUDENTS: &str = "No students found. Add your first student to get started.";

#[derive(Clone)]
pub struct StudentsViewModel {
    ctx: AppContext,
    students: ResourceLoader<Vec<Student>>,
    classroom_id: ReactiveState<Option<String>>,
    query: ReactiveState<String>,
}

impl StudentsViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            students: ResourceLoader::new(),
            classroom_id: ReactiveState::new(None),
            query: ReactiveState::default(),
        }
    }

    pub async fn load(&self) {
        let classroom_id = self.classroom_id.get();
        let api = self.ctx.api.clone();
        self.students
            .load(async move { api.students(classroom_id.as_deref()).await })
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    /// `None` lists the whole school
    pub async fn filter_by_classroom(&self, classroom_id: Option<&str>) {
        self.classroom_id.set(classroom_id.map(str::to_string));
        self.load().await;
    }

    pub fn set_query(&self, query: &str) {
        self.query.set(query.to_string());
    }

    pub fn rows(&self) -> ListView<Student> {
        let query = self.query.get();
        self.students
            .list_view(EMPTY_STUDENTS, |student| student.matches(&query))
    }

    pub fn total(&self) -> usize {
        self.students.len()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.students.subscribe(callback.clone());
        self.query.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{student_json, Harness};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn empty_directory_shows_the_onboarding_message() {
        let harness = Harness::signed_in();
        harness.transport.respond("/students/", 200, json!([]));
        let vm = StudentsViewModel::new(harness.ctx.clone());

        assert_eq!(vm.rows(), ListView::Loading);
        block_on(vm.load());
        assert_eq!(vm.rows(), ListView::Empty(EMPTY_STUDENTS));
    }

    #[test]
    fn server_detail_or_fallback_becomes_the_error() {
        let harness = Harness::signed_in();
        harness
            .transport
            .respond("/students/", 403, json!({ "detail": "Not enough permissions" }));
        let vm = StudentsViewModel::new(harness.ctx.clone());
        block_on(vm.load());
        assert_eq!(vm.rows(), ListView::Error("Not enough permissions".into()));

        harness.transport.respond("/students/", 500, json!({}));
        block_on(vm.retry());
        assert_eq!(vm.rows(), ListView::Error("Something went wrong".into()));
    }

    #[test]
    fn search_matches_name_and_admission_number() {
        let harness = Harness::signed_in();
        harness.transport.respond(
            "/students/",
            200,
            json!([student_json("1", "Alice", "Johnson"), student_json("2", "Bob", "Smith")]),
        );
        let vm = StudentsViewModel::new(harness.ctx.clone());
        block_on(vm.load());

        vm.set_query("smi");
        match vm.rows() {
            ListView::Rows(rows) => assert_eq!(rows[0].id, "2"),
            other => panic!("expected rows, got {:?}", other),
        }

        vm.set_query("adm-1");
        assert!(matches!(vm.rows(), ListView::Rows(rows) if rows.len() == 1));

        vm.set_query("zzz");
        assert_eq!(vm.rows(), ListView::Empty(EMPTY_STUDENTS));
        assert_eq!(vm.total(), 2);
    }

    #[test]
    fn classroom_filter_goes_to_the_server() {
        let harness = Harness::signed_in();
        harness
            .transport
            .respond("/students/?classroom_id=c7", 200, json!([]));
        let vm = StudentsViewModel::new(harness.ctx.clone());
        block_on(vm.filter_by_classroom(Some("c7")));
        assert_eq!(harness.transport.count("/students/?classroom_id=c7"), 1);
    }
}
