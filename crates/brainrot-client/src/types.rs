//! Request types.

use brainrot_models::{FileCategory, MaterialFile};

/// Files sent with one `POST /process-materials` call.
#[derive(Debug, Clone, Default)]
pub struct MaterialsUpload {
    /// Sent as `material_files`, may be empty
    pub materials: Vec<MaterialFile>,
    /// Sent as `assignment_files`; omitted entirely when empty
    pub assignments: Vec<MaterialFile>,
}

impl MaterialsUpload {
    pub fn new(materials: Vec<MaterialFile>) -> Self {
        Self {
            materials,
            assignments: Vec::new(),
        }
    }

    pub fn with_assignments(mut self, assignments: Vec<MaterialFile>) -> Self {
        self.assignments = assignments;
        self
    }

    /// Parts in submission order, tagged with their category.
    pub fn parts(&self) -> impl Iterator<Item = (FileCategory, &MaterialFile)> {
        self.materials
            .iter()
            .map(|f| (FileCategory::Material, f))
            .chain(self.assignments.iter().map(|f| (FileCategory::Assignment, f)))
    }

    pub fn file_count(&self) -> usize {
        self.materials.len() + self.assignments.len()
    }
}
