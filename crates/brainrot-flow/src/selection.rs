//! File selection for the upload screens.
//!
//! The extension allow-list and the file cap are picker affordances, not a
//! security boundary; the backend validates what it receives.

use brainrot_models::{FileCategory, MaterialFile};

/// Rules for one file picker.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    pub category: FileCategory,
    /// Picker label
    pub label: &'static str,
    /// Lower-cased extensions with leading dot
    pub accepted_extensions: &'static [&'static str],
    pub max_files: usize,
    /// Whether submit requires at least one file
    pub required: bool,
    /// A new drop replaces the held list instead of appending to it
    pub replace_on_add: bool,
    /// Message shown when a required selection is empty
    pub empty_message: &'static str,
}

impl SelectionPolicy {
    pub fn assignment() -> Self {
        Self {
            category: FileCategory::Assignment,
            label: "Upload Assignment",
            accepted_extensions: &[".pdf", ".doc", ".docx", ".txt"],
            max_files: 1,
            required: true,
            replace_on_add: true,
            empty_message: "Please upload at least one assignment file",
        }
    }

    pub fn materials(required: bool) -> Self {
        Self {
            category: FileCategory::Material,
            label: "Upload Learning Materials",
            accepted_extensions: &[
                ".pdf", ".ppt", ".pptx", ".doc", ".docx", ".txt", ".jpg", ".png",
            ],
            max_files: 5,
            required,
            replace_on_add: false,
            empty_message: "Please upload at least one learning material.",
        }
    }

    /// Comma-separated allow-list as shown under the picker.
    pub fn accepted_label(&self) -> String {
        self.accepted_extensions.join(",")
    }

    fn accepts(&self, file: &MaterialFile) -> bool {
        file.extension()
            .map(|ext| self.accepted_extensions.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// Why a dropped file was not added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnsupportedType { name: String },
    TooManyFiles { name: String, max_files: usize },
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::UnsupportedType { name } => format!("{}: file type not accepted", name),
            Rejection::TooManyFiles { name, max_files } => {
                format!("{}: at most {} file(s) allowed", name, max_files)
            }
        }
    }
}

/// Outcome of one `add` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

/// Files currently held for one picker.
#[derive(Debug, Clone)]
pub struct FileSelection {
    policy: SelectionPolicy,
    files: Vec<MaterialFile>,
}

impl FileSelection {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            files: Vec::new(),
        }
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn files(&self) -> &[MaterialFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Add dropped files in order, rejecting unsupported types and anything
    /// beyond the cap.
    pub fn add(&mut self, dropped: Vec<MaterialFile>) -> AddReport {
        let mut report = AddReport::default();

        let (accepted, unsupported): (Vec<_>, Vec<_>) =
            dropped.into_iter().partition(|f| self.policy.accepts(f));
        report.rejected.extend(
            unsupported
                .into_iter()
                .map(|f| Rejection::UnsupportedType { name: f.name }),
        );

        if self.policy.replace_on_add && !accepted.is_empty() {
            self.files.clear();
        }

        for file in accepted {
            if self.files.len() >= self.policy.max_files {
                report.rejected.push(Rejection::TooManyFiles {
                    name: file.name,
                    max_files: self.policy.max_files,
                });
            } else {
                self.files.push(file);
                report.accepted += 1;
            }
        }

        report
    }

    /// Remove the entry at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<MaterialFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Validation message if submit must be blocked.
    pub fn validate(&self) -> Option<&'static str> {
        (self.policy.required && self.files.is_empty()).then_some(self.policy.empty_message)
    }

    /// `name (1.23 MB)` lines for the selected-files list.
    pub fn summary_lines(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| format!("{} ({})", f.name, f.size_label()))
            .collect()
    }
}
