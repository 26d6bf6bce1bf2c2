//! Class roster: listing, search, rename and confirmed deletion.

use crate::backend::Backend;
use tracing::{info, instrument, warn};
use vibecheck_common::{ClassGroup, ClassId, Result, VibeCheckError};

/// Rejection of a blank class name.
pub const BLANK_CLASS_NAME_MESSAGE: &str = "Nome da turma não pode ser vazio.";
/// Rejection of an id that is not in the roster.
pub const UNKNOWN_CLASS_MESSAGE: &str = "Turma não encontrada.";
/// Failure of the backend rename call.
pub const RENAME_FAILED_MESSAGE: &str = "Erro ao editar turma. Tente novamente.";
/// Failure of the backend delete call.
pub const DELETE_FAILED_MESSAGE: &str = "Erro ao apagar turma. Tente novamente.";

/// The teacher's classes, kept sorted by name without regard to case.
pub struct ClassRoster<B> {
    backend: B,
    classes: Vec<ClassGroup>,
}

impl<B: Backend> ClassRoster<B> {
    /// Fetch the class list from the backend.
    #[instrument(skip(backend))]
    pub async fn load(backend: B) -> Result<Self> {
        let classes = backend.classes().await?;
        info!("Loaded {} classes", classes.len());
        Ok(Self::from_classes(backend, classes))
    }

    /// Roster over an already fetched class list.
    pub fn from_classes(backend: B, classes: Vec<ClassGroup>) -> Self {
        let mut roster = Self { backend, classes };
        roster.sort();
        roster
    }

    fn sort(&mut self) {
        self.classes.sort_by_cached_key(|c| c.name.to_lowercase());
    }

    /// All classes in display order.
    pub fn classes(&self) -> &[ClassGroup] {
        &self.classes
    }

    /// Class with `id`.
    pub fn get(&self, id: ClassId) -> Option<&ClassGroup> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Classes whose name contains `query`, ignoring case. A blank query matches all.
    pub fn search(&self, query: &str) -> Vec<&ClassGroup> {
        let query = query.trim().to_lowercase();
        self.classes
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Rename class `id`. The roster only changes once the backend accepts.
    #[instrument(skip(self))]
    pub async fn rename(&mut self, id: ClassId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VibeCheckError::validation_field(BLANK_CLASS_NAME_MESSAGE, "nome"));
        }
        if self.get(id).is_none() {
            return Err(VibeCheckError::validation_field(UNKNOWN_CLASS_MESSAGE, "id"));
        }

        self.backend.rename_class(id, name).await.map_err(|e| {
            warn!("Rename of class {} failed: {}", id, e);
            VibeCheckError::with_source(RENAME_FAILED_MESSAGE, e)
        })?;

        if let Some(class) = self.classes.iter_mut().find(|c| c.id == id) {
            class.name = name.to_string();
        }
        self.sort();
        info!("Class {} renamed to {}", id, name);
        Ok(())
    }

    /// Start deleting class `id`. Nothing happens until the returned value
    /// is confirmed; dropping it cancels.
    pub fn request_delete(&self, id: ClassId) -> Result<PendingDeletion> {
        self.get(id)
            .cloned()
            .map(|class| PendingDeletion { class })
            .ok_or_else(|| VibeCheckError::validation_field(UNKNOWN_CLASS_MESSAGE, "id"))
    }

    /// The backend in use.
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}

/// A deletion awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a deletion only happens once confirmed"]
pub struct PendingDeletion {
    class: ClassGroup,
}

impl PendingDeletion {
    /// The class that would be deleted.
    pub const fn class(&self) -> &ClassGroup {
        &self.class
    }

    /// Delete the class on the backend, then drop it from `roster`.
    #[instrument(skip(roster), fields(id = %self.class.id))]
    pub async fn confirm<B: Backend>(self, roster: &mut ClassRoster<B>) -> Result<ClassGroup> {
        roster
            .backend
            .delete_class(self.class.id)
            .await
            .map_err(|e| {
                warn!("Delete of class {} failed: {}", self.class.id, e);
                VibeCheckError::with_source(DELETE_FAILED_MESSAGE, e)
            })?;

        roster.classes.retain(|c| c.id != self.class.id);
        info!("Class {} deleted", self.class.name);
        Ok(self.class)
    }
}
