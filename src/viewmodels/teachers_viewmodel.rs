// ============================================================================
// TEACHERS VIEWMODEL - staff accounts with the teacher role
// ============================================================================

use crate::models::User;
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::resource_loader::{ListView, ResourceLoader};

pub const EMPTY_TEACHERS: &str = "No teachers found. Invite your first teacher to get started.";

/// Name, email or department contains `query` (case-insensitive)
pub fn teacher_matches(teacher: &User, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || teacher.full_name().to_lowercase().contains(&query)
        || teacher.email.to_lowercase().contains(&query)
        || teacher.department_label().to_lowercase().contains(&query)
}

pub fn status_label(teacher: &User) -> &'static str {
    if teacher.is_active {
        "Active"
    } else {
        "Inactive"
    }
}

#[derive(Clone)]
pub struct TeachersViewModel {
    ctx: AppContext,
    teachers: ResourceLoader<Vec<User>>,
    query: ReactiveState<String>,
}

impl TeachersViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            teachers: ResourceLoader::new(),
            query: ReactiveState::default(),
        }
    }

    pub async fn load(&self) {
        self.teachers.load(self.ctx.api.teachers()).await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn set_query(&self, query: &str) {
        self.query.set(query.to_string());
    }

    pub fn rows(&self) -> ListView<User> {
        let query = self.query.get();
        self.teachers
            .list_view(EMPTY_TEACHERS, |teacher| teacher_matches(teacher, &query))
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.teachers.subscribe(callback.clone());
        self.query.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use futures::executor::block_on;
    use serde_json::json;

    fn staff() -> serde_json::Value {
        json!([
            { "id": "t1", "email": "ada@school.test", "first_name": "Ada",
              "last_name": "Lovelace", "role": "teacher", "department": "Mathematics",
              "last_login": "2025-03-01T08:00:00Z" },
            { "id": "t2", "email": "alan@school.test", "first_name": "Alan",
              "last_name": "Turing", "role": "teacher", "is_active": false }
        ])
    }

    #[test]
    fn teachers_come_from_the_role_filtered_user_list() {
        let harness = Harness::signed_in();
        harness.transport.respond("/users/?role=teacher", 200, staff());
        let vm = TeachersViewModel::new(harness.ctx.clone());
        block_on(vm.load());

        let ListView::Rows(rows) = vm.rows() else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].last_login_label(), "2025-03-01");
        assert_eq!(rows[1].last_login_label(), "Never");
        assert_eq!(status_label(&rows[1]), "Inactive");
    }

    #[test]
    fn search_covers_department_and_email() {
        let harness = Harness::signed_in();
        harness.transport.respond("/users/?role=teacher", 200, staff());
        let vm = TeachersViewModel::new(harness.ctx.clone());
        block_on(vm.load());

        vm.set_query("math");
        assert!(matches!(vm.rows(), ListView::Rows(rows) if rows[0].id == "t1"));
        vm.set_query("ALAN@");
        assert!(matches!(vm.rows(), ListView::Rows(rows) if rows[0].id == "t2"));
        // Missing department reads as "General"
        vm.set_query("general");
        assert!(matches!(vm.rows(), ListView::Rows(rows) if rows.len() == 1));
    }

    #[test]
    fn no_teachers_is_not_an_error() {
        let harness = Harness::signed_in();
        harness.transport.respond("/users/?role=teacher", 200, json!([]));
        let vm = TeachersViewModel::new(harness.ctx.clone());
        block_on(vm.load());
        assert_eq!(vm.rows(), ListView::Empty(EMPTY_TEACHERS));
    }
}
