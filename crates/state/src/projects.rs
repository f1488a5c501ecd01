//! Project collection state.
//!
//! [`ProjectStore`] keeps every project the client has seen in one
//! normalized table: records live in a map keyed by id, and the three
//! listings (`all`, `mine`, `approved`) are id vectors over that map.
//! A record updated through any path is therefore updated everywhere
//! at once, including the currently open detail view.
//!
//! Listing loads run through a [`RequestSlot`] per lane, so when
//! refilters overlap only the most recently issued call ever lands.
//! Mutations publish a [`Notice`] on the shared bus so whatever front
//! end is attached can toast the outcome.

use std::collections::HashMap;
use std::sync::Arc;

use scholarbase_client::{PortalApiError, ProjectBackend, RequestSlot};
use scholarbase_core::{
    CreateProject, DbId, ProjectFilter, ProjectRecord, ProjectStatus, ProjectTally, ReviewRequest,
    Tag, UpdateProject,
};
use tokio::sync::RwLock;

use crate::notify::{Notice, NoticeBus};

#[derive(Debug, Default)]
struct ProjectsState {
    records: HashMap<DbId, ProjectRecord>,
    all: Vec<DbId>,
    mine: Vec<DbId>,
    approved: Vec<DbId>,
    current: Option<DbId>,
    loading: bool,
    error: Option<String>,
}

impl ProjectsState {
    /// Materialize a membership list against the record table. Ids whose
    /// record has been deleted are skipped rather than surfaced as holes.
    fn view(&self, ids: &[DbId]) -> Vec<ProjectRecord> {
        ids.iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }

    fn upsert(&mut self, record: ProjectRecord) -> DbId {
        let id = record.id;
        self.records.insert(id, record);
        id
    }

    /// Upsert a whole listing and return its membership, in order.
    fn adopt_listing(&mut self, items: Vec<ProjectRecord>) -> Vec<DbId> {
        items.into_iter().map(|record| self.upsert(record)).collect()
    }
}

/// Shared project controller.
pub struct ProjectStore {
    backend: Arc<dyn ProjectBackend>,
    notices: NoticeBus,
    inner: RwLock<ProjectsState>,
    all_slot: RequestSlot,
    approved_slot: RequestSlot,
    mine_slot: RequestSlot,
    one_slot: RequestSlot,
}

impl ProjectStore {
    pub fn new(backend: Arc<dyn ProjectBackend>, notices: NoticeBus) -> Self {
        Self {
            backend,
            notices,
            inner: RwLock::new(ProjectsState::default()),
            all_slot: RequestSlot::new(),
            approved_slot: RequestSlot::new(),
            mine_slot: RequestSlot::new(),
            one_slot: RequestSlot::new(),
        }
    }

    /// The bus mutations report through; subscribe to render toasts.
    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    // ---- listing loads ----

    /// Load the full corpus with `filter` applied server-side.
    ///
    /// If a newer `load_all` claims the lane first, this call resolves
    /// without writing anything: the superseding call owns the flags and
    /// the membership from the moment it claims.
    pub async fn load_all(&self, filter: &ProjectFilter) {
        self.begin().await;
        match self.all_slot.run(self.backend.list_all(filter)).await {
            Ok(Some(page)) => {
                let mut state = self.inner.write().await;
                let ids = state.adopt_listing(page.items);
                tracing::debug!(count = ids.len(), "Loaded project corpus");
                state.all = ids;
                state.loading = false;
            }
            Ok(None) => {
                tracing::debug!("Corpus load superseded by a newer call");
            }
            Err(err) => self.fail("load projects", err).await,
        }
    }

    /// Load the approved (publicly browsable) listing.
    pub async fn load_approved(&self, filter: &ProjectFilter) {
        self.begin().await;
        match self
            .approved_slot
            .run(self.backend.list_approved(filter))
            .await
        {
            Ok(Some(page)) => {
                let mut state = self.inner.write().await;
                let ids = state.adopt_listing(page.items);
                tracing::debug!(count = ids.len(), "Loaded approved listing");
                state.approved = ids;
                state.loading = false;
            }
            Ok(None) => {
                tracing::debug!("Approved load superseded by a newer call");
            }
            Err(err) => self.fail("load approved projects", err).await,
        }
    }

    /// Load the signed-in student's own projects.
    pub async fn load_mine(&self) {
        self.begin().await;
        match self.mine_slot.run(self.backend.list_mine()).await {
            Ok(Some(items)) => {
                let mut state = self.inner.write().await;
                let ids = state.adopt_listing(items);
                tracing::debug!(count = ids.len(), "Loaded own projects");
                state.mine = ids;
                state.loading = false;
            }
            Ok(None) => {
                tracing::debug!("Own-projects load superseded by a newer call");
            }
            Err(err) => self.fail("load your projects", err).await,
        }
    }

    /// Load one project and make it the current detail record.
    pub async fn load_one(&self, id: DbId) {
        self.begin().await;
        match self.one_slot.run(self.backend.get(id)).await {
            Ok(Some(record)) => {
                let mut state = self.inner.write().await;
                let id = state.upsert(record);
                state.current = Some(id);
                state.loading = false;
            }
            Ok(None) => {
                tracing::debug!(project_id = id, "Detail load superseded by a newer call");
            }
            Err(err) => self.fail("load project", err).await,
        }
    }

    /// Reload the corpus and the own-projects listing together.
    pub async fn refresh(&self, filter: &ProjectFilter) {
        tokio::join!(self.load_all(filter), self.load_mine());
    }

    // ---- mutations ----

    /// Submit a new project. Returns the created record on success.
    ///
    /// Validation runs before anything leaves the process; an invalid
    /// submission sets `error`, publishes an error notice, and never
    /// reaches the backend.
    pub async fn create(&self, data: &CreateProject) -> Option<ProjectRecord> {
        if let Err(err) = data.validate_for_submit() {
            let message = err.user_message();
            tracing::debug!(error = %message, "Rejected submission before send");
            self.notices.publish(Notice::error(&message));
            self.inner.write().await.error = Some(message);
            return None;
        }

        self.begin().await;
        match self.backend.create(data).await {
            Ok(record) => {
                tracing::info!(project_id = record.id, title = %record.title, "Project submitted");
                let mut state = self.inner.write().await;
                let id = state.upsert(record.clone());
                state.mine.insert(0, id);
                state.all.insert(0, id);
                state.loading = false;
                drop(state);
                self.notices
                    .publish(Notice::success("Project created successfully!"));
                Some(record)
            }
            Err(err) => {
                self.fail("create project", err).await;
                None
            }
        }
    }

    /// Update an existing project. The returned record replaces the old
    /// one in the table, so every view reflects the edit at once.
    pub async fn update(&self, data: &UpdateProject) -> Option<ProjectRecord> {
        self.begin().await;
        match self.backend.update(data).await {
            Ok(record) => {
                tracing::info!(project_id = record.id, "Project updated");
                let mut state = self.inner.write().await;
                state.upsert(record.clone());
                state.loading = false;
                drop(state);
                self.notices
                    .publish(Notice::success("Project updated successfully!"));
                Some(record)
            }
            Err(err) => {
                self.fail("update project", err).await;
                None
            }
        }
    }

    /// Delete a project everywhere: record, memberships, and the detail
    /// slot if it was open.
    pub async fn delete(&self, id: DbId) -> bool {
        self.begin().await;
        match self.backend.delete(id).await {
            Ok(()) => {
                tracing::info!(project_id = id, "Project deleted");
                let mut state = self.inner.write().await;
                state.records.remove(&id);
                state.all.retain(|&member| member != id);
                state.mine.retain(|&member| member != id);
                state.approved.retain(|&member| member != id);
                if state.current == Some(id) {
                    state.current = None;
                }
                state.loading = false;
                drop(state);
                self.notices
                    .publish(Notice::success("Project deleted successfully!"));
                true
            }
            Err(err) => {
                self.fail("delete project", err).await;
                false
            }
        }
    }

    /// Approve a pending project.
    pub async fn approve(&self, id: DbId) -> bool {
        self.begin().await;
        match self.backend.approve(id).await {
            Ok(record) => {
                self.adopt_moderated(record, "Project approved successfully!")
                    .await;
                true
            }
            Err(err) => {
                self.fail("approve project", err).await;
                false
            }
        }
    }

    /// Reject a pending project, optionally with a reason.
    pub async fn reject(&self, id: DbId, reason: Option<&str>) -> bool {
        self.begin().await;
        match self.backend.reject(id, reason).await {
            Ok(record) => {
                self.adopt_moderated(record, "Project rejected successfully!")
                    .await;
                true
            }
            Err(err) => {
                self.fail("reject project", err).await;
                false
            }
        }
    }

    /// Move a project to an arbitrary review status, with an optional
    /// reviewer comment.
    pub async fn update_status(
        &self,
        id: DbId,
        status: ProjectStatus,
        comment: Option<&str>,
    ) -> bool {
        self.begin().await;
        let request = ReviewRequest {
            status,
            review_comment: comment.map(str::to_owned),
        };
        match self.backend.review(id, &request).await {
            Ok(record) => {
                let notice = format!("Project status updated to {status}!");
                self.adopt_moderated(record, &notice).await;
                true
            }
            Err(err) => {
                self.fail("update project status", err).await;
                false
            }
        }
    }

    // ---- snapshot accessors ----

    pub async fn all(&self) -> Vec<ProjectRecord> {
        let state = self.inner.read().await;
        state.view(&state.all)
    }

    pub async fn mine(&self) -> Vec<ProjectRecord> {
        let state = self.inner.read().await;
        state.view(&state.mine)
    }

    pub async fn approved(&self) -> Vec<ProjectRecord> {
        let state = self.inner.read().await;
        state.view(&state.approved)
    }

    pub async fn current(&self) -> Option<ProjectRecord> {
        let state = self.inner.read().await;
        state.current.and_then(|id| state.records.get(&id).cloned())
    }

    pub async fn loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    // ---- derived queries over the loaded corpus ----

    pub async fn by_status(&self, status: ProjectStatus) -> Vec<ProjectRecord> {
        self.filter(&ProjectFilter {
            status: Some(status),
            ..ProjectFilter::default()
        })
        .await
    }

    /// Projects carrying at least one of `tags`. An empty list imposes
    /// no constraint, same as the filter engine.
    pub async fn by_tags(&self, tags: &[Tag]) -> Vec<ProjectRecord> {
        self.filter(&ProjectFilter {
            tags: tags.to_vec(),
            ..ProjectFilter::default()
        })
        .await
    }

    pub async fn by_year(&self, year: &str) -> Vec<ProjectRecord> {
        self.filter(&ProjectFilter {
            year: Some(year.to_owned()),
            ..ProjectFilter::default()
        })
        .await
    }

    /// Run the full filter engine over the loaded corpus.
    pub async fn filter(&self, filter: &ProjectFilter) -> Vec<ProjectRecord> {
        let state = self.inner.read().await;
        filter.apply(&state.view(&state.all))
    }

    /// Status tally over the signed-in student's own projects.
    pub async fn my_tally(&self) -> ProjectTally {
        let state = self.inner.read().await;
        ProjectTally::tally(&state.view(&state.mine))
    }

    // ---- private helpers ----

    async fn begin(&self) {
        let mut state = self.inner.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn fail(&self, action: &str, error: PortalApiError) {
        let message = error.user_message();
        tracing::warn!(error = %message, "Failed to {action}");
        self.notices.publish(Notice::error(&message));
        let mut state = self.inner.write().await;
        state.error = Some(message);
        state.loading = false;
    }

    /// Adopt a record returned by a moderation call.
    ///
    /// Only the record table changes. Membership lists keep their ids,
    /// so an already-loaded approved listing does not gain a freshly
    /// approved project until `load_approved` runs again.
    async fn adopt_moderated(&self, record: ProjectRecord, notice: &str) {
        tracing::info!(project_id = record.id, status = %record.status, "Project moderated");
        let mut state = self.inner.write().await;
        state.upsert(record);
        state.loading = false;
        drop(state);
        self.notices.publish(Notice::success(notice));
    }
}
