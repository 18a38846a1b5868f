// ============================================================================
// SETTINGS VIEWMODEL - school profile + account
// ============================================================================
// The school is found through the signed-in user: /auth/me then /schools/{id}.
// Form edits live in a buffer until save(); reloading resets the buffer.
// ============================================================================

use crate::models::{School, SchoolUpdate, User};
use crate::services::{ApiClient, ApiError};
use crate::state::{AppContext, ReactiveState};
use crate::viewmodels::action::{report, ActionError};
use crate::viewmodels::resource_loader::ResourceLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsSection {
    #[default]
    School,
    Account,
    Notifications,
    Privacy,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 4] = [
        SettingsSection::School,
        SettingsSection::Account,
        SettingsSection::Notifications,
        SettingsSection::Privacy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsSection::School => "School Profile",
            SettingsSection::Account => "Account Info",
            SettingsSection::Notifications => "Notifications",
            SettingsSection::Privacy => "Security & Privacy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsProfile {
    pub user: User,
    /// Absent for accounts without a tenant
    pub school: Option<School>,
}

async fn fetch_profile(api: ApiClient) -> Result<SettingsProfile, ApiError> {
    let user = api.me().await?;
    let school = match user.school_id.as_deref() {
        Some(school_id) => Some(api.school(school_id).await?),
        None => None,
    };
    Ok(SettingsProfile { user, school })
}

#[derive(Clone)]
pub struct SettingsViewModel {
    ctx: AppContext,
    section: ReactiveState<SettingsSection>,
    profile: ResourceLoader<SettingsProfile>,
    form: ReactiveState<SchoolUpdate>,
    saving: ReactiveState<bool>,
}

impl SettingsViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            section: ReactiveState::default(),
            profile: ResourceLoader::new(),
            form: ReactiveState::default(),
            saving: ReactiveState::new(false),
        }
    }

    pub async fn load(&self) {
        self.profile.load(fetch_profile(self.ctx.api.clone())).await;
        if let Some(school) = self.school() {
            self.form.set(SchoolUpdate::from_school(&school));
        }
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn section(&self) -> SettingsSection {
        self.section.get()
    }

    pub fn select_section(&self, section: SettingsSection) {
        self.section.set(section);
    }

    pub fn profile(&self) -> &ResourceLoader<SettingsProfile> {
        &self.profile
    }

    pub fn school(&self) -> Option<School> {
        self.profile.data().and_then(|profile| profile.school)
    }

    pub fn form(&self) -> SchoolUpdate {
        self.form.get()
    }

    pub fn edit<F>(&self, change: F)
    where
        F: FnOnce(&mut SchoolUpdate),
    {
        self.form.update(change);
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    pub async fn save(&self) -> Result<School, ActionError> {
        let result = self.submit().await;
        report(&self.ctx.notifications, result, "Settings saved successfully")
    }

    async fn submit(&self) -> Result<School, ActionError> {
        let Some(school) = self.school() else {
            return Err(ActionError::Rejected("No school profile loaded"));
        };
        if self.saving.get() {
            return Err(ActionError::Rejected("Settings are already being saved"));
        }

        let update = self.form.get();
        if update.name.as_deref().map(str::trim).unwrap_or("").is_empty() {
            return Err(ActionError::Rejected("School name is required"));
        }

        self.saving.set(true);
        let result = self.ctx.api.update_school(&school.id, &update).await;
        self.saving.set(false);
        let saved = result?;

        // Keep the page in step with what the server stored
        self.profile.modify(|profile| profile.school = Some(saved.clone()));
        Ok(saved)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.section.subscribe(callback.clone());
        self.profile.subscribe(callback.clone());
        self.form.subscribe(callback.clone());
        self.saving.subscribe(callback);
    }
}
