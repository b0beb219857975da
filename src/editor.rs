//! The post editor: one record, its form and its live preview.

use crate::document::PostDocument;
use crate::error::EditError;
use crate::export::ExportRequest;
use crate::platform::{Platform, PlatformDescriptor};
use crate::record::{FieldId, FieldKind, FieldPatch, FieldValue, MetricId, PostRecord};
use crate::render::{Preview, render_preview};
use crate::theme::Theme;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`PostDocument`].
pub trait Configurable {
    /// Applies a document's values. Returns whether anything changed.
    fn apply_document(&mut self, document: &PostDocument) -> Result<bool, EditError>;

    /// Exports the current values as a document.
    fn export_document(&self) -> PostDocument;
}

// ============================================================================
// Form Model
// ============================================================================

/// The control a form field is edited with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormControl {
    /// Single-line text input.
    Text { value: String },
    /// Multi-line text area for the post body.
    TextArea { value: String, placeholder: &'static str },
    /// Checkbox.
    Checkbox { checked: bool },
    /// File picker; `has_image` is false while the placeholder is shown.
    ImagePicker { has_image: bool },
}

/// Identifies what a form field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKey {
    Field(FieldId),
    Content,
    Metric(MetricId),
}

/// One labelled input of the editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: FormKey,
    pub label: &'static str,
    pub control: FormControl,
}

// ============================================================================
// PostEditor
// ============================================================================

/// Binds a [`PostRecord`] to a form model and a live preview.
///
/// Every platform uses this same component; the differences come from the
/// platform's static descriptor.
///
/// The preview exists only while the editor is mounted. Each change to the
/// record bumps [`version`](Self::version) and, when mounted, re-renders the
/// preview before returning.
///
/// # Example
///
/// ```
/// use postmock::{FieldId, FieldPatch, Platform, PostEditor};
///
/// let mut editor = PostEditor::new(Platform::LinkedIn);
/// let changed = editor.edit(FieldPatch::text(FieldId::Name, "Ada Lovelace")).unwrap();
///
/// assert!(changed);
/// assert!(editor.preview().unwrap().markup().contains("Ada Lovelace"));
/// ```
#[derive(Debug, Clone)]
pub struct PostEditor {
    record: PostRecord,
    version: u64,
    preview: Option<Preview>,
}

impl PostEditor {
    /// Creates a mounted editor holding the platform's sample post.
    pub fn new(platform: Platform) -> Self {
        let mut editor = Self::unmounted(platform);
        editor.mount();
        editor
    }

    /// Creates an editor without a preview.
    pub fn unmounted(platform: Platform) -> Self {
        Self {
            record: PostRecord::sample(platform),
            version: 0,
            preview: None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.record.platform()
    }

    pub fn descriptor(&self) -> &'static PlatformDescriptor {
        self.record.descriptor()
    }

    pub fn record(&self) -> &PostRecord {
        &self.record
    }

    pub fn theme(&self) -> Theme {
        self.record.theme()
    }

    /// Counter bumped on every change to the record.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ------------------------------------------------------------------------
    // Mounting
    // ------------------------------------------------------------------------

    /// Renders the preview and keeps it current from now on.
    pub fn mount(&mut self) {
        if self.preview.is_none() {
            self.preview = Some(render_preview(&self.record));
        }
    }

    /// Drops the preview and discards edits; the record goes back to the
    /// platform's sample post.
    ///
    /// An unmounted editor still accepts edits, which show once it is
    /// mounted again.
    pub fn unmount(&mut self) {
        self.preview = None;
        self.replace(PostRecord::sample(self.platform()));
    }

    pub fn is_mounted(&self) -> bool {
        self.preview.is_some()
    }

    /// The current preview, if mounted.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Replaces one field and re-renders.
    ///
    /// Returns `Ok(false)` if the value was already set. A rejected patch
    /// leaves the editor untouched.
    pub fn edit(&mut self, patch: FieldPatch) -> Result<bool, EditError> {
        let next = self.record.apply(&patch)?;
        Ok(self.replace(next))
    }

    /// Switches the preview to `theme`. Returns whether it changed.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.record.theme() {
            return false;
        }
        let next = self.record.with_theme(theme);
        self.replace(next)
    }

    /// Flips between light and dark and returns the new theme.
    ///
    /// Profile, content and metric values are not affected.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.record.theme().toggled();
        self.set_theme(theme);
        theme
    }

    fn replace(&mut self, next: PostRecord) -> bool {
        if next == self.record {
            return false;
        }
        self.record = next;
        self.version += 1;
        if self.preview.is_some() {
            self.preview = Some(render_preview(&self.record));
        }
        true
    }

    // ------------------------------------------------------------------------
    // Form and Export
    // ------------------------------------------------------------------------

    /// Describes the editor form: profile fields, then content, then
    /// metrics, each with its current value.
    ///
    /// The form does not depend on the theme.
    pub fn form(&self) -> Vec<FormField> {
        let descriptor = self.descriptor();
        let mut form = Vec::with_capacity(descriptor.fields.len() + descriptor.metrics.len() + 1);

        for spec in descriptor.fields {
            let control = match (spec.kind, self.record.field(spec.id)) {
                (FieldKind::Flag, value) => FormControl::Checkbox {
                    checked: value.and_then(FieldValue::as_flag).unwrap_or(false),
                },
                (FieldKind::Image, value) => FormControl::ImagePicker {
                    has_image: value
                        .and_then(FieldValue::as_image)
                        .is_some_and(|img| !img.is_placeholder()),
                },
                (FieldKind::Text, value) => FormControl::Text {
                    value: value
                        .and_then(FieldValue::as_text)
                        .unwrap_or_default()
                        .to_string(),
                },
            };
            form.push(FormField {
                key: FormKey::Field(spec.id),
                label: spec.label,
                control,
            });
        }

        form.push(FormField {
            key: FormKey::Content,
            label: descriptor.content.label,
            control: FormControl::TextArea {
                value: self.record.content().to_string(),
                placeholder: descriptor.content.placeholder,
            },
        });

        for spec in descriptor.metrics {
            form.push(FormField {
                key: FormKey::Metric(spec.id),
                label: spec.label,
                control: FormControl::Text {
                    value: self.record.metric(spec.id).to_string(),
                },
            });
        }

        form
    }

    /// Snapshots the preview for export, or `None` when not mounted.
    ///
    /// The request owns its data; the editor may keep changing while the
    /// export runs.
    pub fn export_request(&self) -> Option<ExportRequest> {
        self.preview.clone().map(ExportRequest::new)
    }
}

impl Configurable for PostEditor {
    /// Applies a document. Either all of it applies or none of it does.
    fn apply_document(&mut self, document: &PostDocument) -> Result<bool, EditError> {
        let next = document.apply_to(&self.record)?;
        Ok(self.replace(next))
    }

    fn export_document(&self) -> PostDocument {
        PostDocument::from_record(&self.record)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ImageRef;

    #[test]
    fn starts_mounted_with_sample() {
        let editor = PostEditor::new(Platform::X);
        assert!(editor.is_mounted());
        assert_eq!(editor.theme(), Theme::Dark);
        assert_eq!(editor.record().text(FieldId::Name), "John Smith");
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn edit_rerenders_preview() {
        let mut editor = PostEditor::new(Platform::Facebook);
        let before = editor.preview().unwrap().clone();

        assert!(editor.edit(FieldPatch::content("New post")).unwrap());
        let after = editor.preview().unwrap();
        assert_ne!(&before, after);
        assert!(after.markup().contains("New post"));
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn repeating_an_edit_is_a_no_op() {
        let mut editor = PostEditor::new(Platform::LinkedIn);
        let patch = FieldPatch::metric(MetricId::Likes, "500");
        assert!(editor.edit(patch.clone()).unwrap());
        let record = editor.record().clone();
        let preview = editor.preview().cloned();

        assert!(!editor.edit(patch).unwrap());
        assert_eq!(editor.record(), &record);
        assert_eq!(editor.preview().cloned(), preview);
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn rejected_edit_leaves_state() {
        let mut editor = PostEditor::new(Platform::LinkedIn);
        let err = editor
            .edit(FieldPatch::flag(FieldId::Verified, true))
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownField { .. }));
        assert_eq!(editor.record(), &PostRecord::sample(Platform::LinkedIn));
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn toggle_theme_keeps_fields_and_form() {
        let mut editor = PostEditor::new(Platform::Instagram);
        editor
            .edit(FieldPatch::text(FieldId::Location, "Lisbon"))
            .unwrap();
        let record = editor.record().clone();
        let form = editor.form();
        let preview = editor.preview().unwrap().clone();

        assert_eq!(editor.toggle_theme(), Theme::Dark);
        assert!(editor.record().same_fields(&record));
        assert_eq!(editor.form(), form);
        assert_ne!(editor.preview().unwrap(), &preview);

        assert_eq!(editor.toggle_theme(), Theme::Light);
        assert_eq!(editor.preview().unwrap(), &preview);
    }

    #[test]
    fn unmounted_editor_has_no_export() {
        let mut editor = PostEditor::unmounted(Platform::TikTok);
        assert!(editor.export_request().is_none());

        editor.edit(FieldPatch::content("still editable")).unwrap();
        assert!(editor.preview().is_none());

        editor.mount();
        let request = editor.export_request().unwrap();
        assert_eq!(request.filename, "tiktok-post.png");
        assert!(request.preview.markup().contains("still editable"));
    }

    #[test]
    fn unmount_discards_edits() {
        let mut editor = PostEditor::new(Platform::Instagram);
        editor.edit(FieldPatch::content("gone soon")).unwrap();
        editor.unmount();

        assert!(!editor.is_mounted());
        assert_eq!(editor.record(), &PostRecord::sample(Platform::Instagram));
        assert_eq!(editor.version(), 2);

        editor.mount();
        assert!(!editor.preview().unwrap().markup().contains("gone soon"));
    }

    #[test]
    fn export_snapshot_is_independent_of_later_edits() {
        let mut editor = PostEditor::new(Platform::X);
        let request = editor.export_request().unwrap();
        editor.edit(FieldPatch::content("after")).unwrap();
        assert!(!request.preview.markup().contains(">after<"));
    }

    #[test]
    fn form_lists_fields_content_and_metrics() {
        let editor = PostEditor::new(Platform::TikTok);
        let form = editor.form();
        let desc = Platform::TikTok.descriptor();
        assert_eq!(form.len(), desc.fields.len() + 1 + desc.metrics.len());

        let content = form.iter().find(|f| f.key == FormKey::Content).unwrap();
        assert_eq!(content.label, "Video Description");

        let thumb = form
            .iter()
            .find(|f| f.key == FormKey::Field(FieldId::Thumbnail))
            .unwrap();
        assert_eq!(thumb.control, FormControl::ImagePicker { has_image: false });
    }

    #[test]
    fn upload_patch_marks_picker() {
        let mut editor = PostEditor::new(Platform::X);
        let url = crate::DataUrl::from_bytes("image/png", &[1]);
        editor
            .edit(FieldPatch::image(FieldId::Avatar, ImageRef::Embedded(url)))
            .unwrap();
        let avatar = editor
            .form()
            .into_iter()
            .find(|f| f.key == FormKey::Field(FieldId::Avatar))
            .unwrap();
        assert_eq!(avatar.control, FormControl::ImagePicker { has_image: true });
    }

    #[test]
    fn document_roundtrip_through_editor() {
        let mut source = PostEditor::new(Platform::Facebook);
        source.edit(FieldPatch::text(FieldId::Privacy, "Friends")).unwrap();
        source.toggle_theme();

        let json = source.export_document().to_json().unwrap();
        let mut target = PostEditor::new(Platform::Facebook);
        assert!(target.apply_document(&PostDocument::from_json(&json).unwrap()).unwrap());
        assert_eq!(target.record(), source.record());
        assert_eq!(target.preview(), source.preview());
    }

    #[test]
    fn document_for_other_platform_is_rejected() {
        let mut editor = PostEditor::new(Platform::Facebook);
        let err = editor
            .apply_document(&PostDocument::new(Platform::LinkedIn))
            .unwrap_err();
        assert!(matches!(err, EditError::PlatformMismatch { .. }));
        assert_eq!(editor.version(), 0);
    }
}
