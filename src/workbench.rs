//! Tabbed host holding one editor per platform.

use crate::editor::PostEditor;
use crate::platform::Platform;

/// One editor per platform with a single active tab.
///
/// Only the active tab is mounted, so only it has a preview to export.
/// Leaving a tab discards its edits: coming back starts again from the
/// platform's sample post.
///
/// ```
/// use postmock::{Platform, Workbench};
///
/// let mut bench = Workbench::new();
/// assert_eq!(bench.active(), Platform::LinkedIn);
///
/// bench.select(Platform::TikTok);
/// assert!(bench.editor(Platform::TikTok).is_mounted());
/// assert!(!bench.editor(Platform::LinkedIn).is_mounted());
/// ```
#[derive(Debug, Clone)]
pub struct Workbench {
    editors: [PostEditor; 5],
    active: Platform,
}

impl Workbench {
    /// Creates editors for every platform with LinkedIn active.
    pub fn new() -> Self {
        let mut bench = Self {
            editors: Platform::ALL.map(PostEditor::unmounted),
            active: Platform::LinkedIn,
        };
        bench.editor_mut(Platform::LinkedIn).mount();
        bench
    }

    pub fn active(&self) -> Platform {
        self.active
    }

    /// Switches tabs. Returns whether the active tab changed.
    pub fn select(&mut self, platform: Platform) -> bool {
        if platform == self.active {
            return false;
        }
        log::debug!("switching tab {} -> {platform}", self.active);
        self.editor_mut(self.active).unmount();
        self.active = platform;
        self.editor_mut(platform).mount();
        true
    }

    pub fn editor(&self, platform: Platform) -> &PostEditor {
        &self.editors[Self::index(platform)]
    }

    pub fn editor_mut(&mut self, platform: Platform) -> &mut PostEditor {
        &mut self.editors[Self::index(platform)]
    }

    /// The active tab's editor.
    pub fn current(&self) -> &PostEditor {
        self.editor(self.active)
    }

    pub fn current_mut(&mut self) -> &mut PostEditor {
        self.editor_mut(self.active)
    }

    fn index(platform: Platform) -> usize {
        match platform {
            Platform::LinkedIn => 0,
            Platform::X => 1,
            Platform::Instagram => 2,
            Platform::TikTok => 3,
            Platform::Facebook => 4,
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{DownloadSink, ExportOutcome, Rasterizer, RasterOptions, export_preview};
    use crate::record::{FieldId, FieldPatch};
    use crate::render::Preview;
    use crate::{DataUrl, ExportError};

    #[test]
    fn index_matches_platform_order() {
        let bench = Workbench::new();
        for platform in Platform::ALL {
            assert_eq!(bench.editor(platform).platform(), platform);
        }
    }

    #[test]
    fn only_active_tab_is_mounted() {
        let mut bench = Workbench::new();
        assert!(bench.select(Platform::Instagram));
        assert!(!bench.select(Platform::Instagram));

        for platform in Platform::ALL {
            assert_eq!(
                bench.editor(platform).is_mounted(),
                platform == Platform::Instagram,
                "{platform}"
            );
        }
    }

    #[test]
    fn leaving_a_tab_resets_its_post() {
        let mut bench = Workbench::new();
        bench
            .current_mut()
            .edit(FieldPatch::text(FieldId::Name, "Edited"))
            .unwrap();
        bench.select(Platform::X);
        assert_eq!(bench.editor(Platform::LinkedIn).record().text(FieldId::Name), "Jane Doe");

        bench.select(Platform::LinkedIn);
        let markup = bench.current().preview().unwrap().markup();
        assert!(markup.contains("Jane Doe"));
        assert!(!markup.contains("Edited"));
    }

    #[test]
    fn reselecting_active_tab_keeps_edits() {
        let mut bench = Workbench::new();
        bench
            .current_mut()
            .edit(FieldPatch::text(FieldId::Name, "Edited"))
            .unwrap();
        assert!(!bench.select(Platform::LinkedIn));
        assert_eq!(bench.current().record().text(FieldId::Name), "Edited");
    }

    struct Stub;

    impl Rasterizer for Stub {
        async fn rasterize(&self, _: &Preview, _: &RasterOptions) -> Result<DataUrl, ExportError> {
            Ok(DataUrl::from_bytes("image/png", b""))
        }
    }

    impl DownloadSink for Stub {
        fn deliver(&self, _: &str, _: &DataUrl) -> Result<(), ExportError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn export_from_inactive_tab_has_no_preview() {
        let bench = Workbench::new();
        let outcome = export_preview(bench.editor(Platform::X).export_request(), &Stub, &Stub).await;
        assert_eq!(outcome, ExportOutcome::NoPreview);

        let outcome = export_preview(bench.current().export_request(), &Stub, &Stub).await;
        assert_eq!(outcome, ExportOutcome::Saved("linkedin-post.png".into()));
    }
}
