//! Host-facing tool interface
//!
//! A host viewer drives a tool through a small set of named operations:
//! lifecycle (register, activate, ...) and input (picks, clicks, keys).

use crate::config::{AlignConfig, AlignmentMode};
use crate::session::{AlignmentSession, PickOutcome};
use pickalign_core::{MarkerSink, ObjectTransforms, PickProvider, PickResult, Result};
use tracing::{debug, info};

/// Key code that cancels the running session
pub const ESCAPE_KEY_CODE: u32 = 27;

/// Mouse button of a click event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// Operations a host viewer dispatches to an alignment tool
pub trait AlignmentTool {
    /// Names the tool is registered under
    fn names(&self) -> &[&'static str];

    /// Dispatch priority; higher runs before the host's default tools
    fn priority(&self) -> i32;

    fn register(&mut self);

    fn deregister(&mut self);

    fn activate(&mut self);

    fn deactivate(&mut self);

    fn is_active(&self) -> bool;

    /// Feed a snapped pick, or `None` when nothing was under the cursor
    ///
    /// Returns `true` when the pick resolved an alignment and the host should
    /// stop propagating the event.
    fn handle_pick(&mut self, pick: Option<PickResult>) -> Result<bool>;

    /// Discard the running session; returns `true` if the event was consumed
    fn handle_cancel(&mut self) -> bool;

    /// Primary-button clicks become picks from `provider`
    fn handle_single_click(
        &mut self,
        button: MouseButton,
        provider: &dyn PickProvider,
    ) -> Result<bool> {
        if button != MouseButton::Primary {
            return Ok(false);
        }
        self.handle_pick(provider.snap_result())
    }

    /// Escape cancels
    fn handle_key_up(&mut self, key_code: u32) -> bool {
        key_code == ESCAPE_KEY_CODE && self.handle_cancel()
    }
}

/// Point-pick alignment tool in rotation or translation mode
pub struct PickAlignTool<T, V> {
    names: [&'static str; 1],
    priority: i32,
    registered: bool,
    active: bool,
    session: AlignmentSession<T, V>,
}

impl<T: ObjectTransforms, V: MarkerSink> PickAlignTool<T, V> {
    pub fn new(config: &AlignConfig, transforms: T, markers: V) -> Self {
        Self {
            names: [config.mode.tool_name()],
            priority: config.priority,
            registered: false,
            active: false,
            session: AlignmentSession::new(config, transforms, markers),
        }
    }

    pub fn mode(&self) -> AlignmentMode {
        self.session.mode()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn session(&self) -> &AlignmentSession<T, V> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AlignmentSession<T, V> {
        &mut self.session
    }

    pub fn into_session(self) -> AlignmentSession<T, V> {
        self.session
    }
}

impl<T: ObjectTransforms, V: MarkerSink> AlignmentTool for PickAlignTool<T, V> {
    fn names(&self) -> &[&'static str] {
        &self.names
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn register(&mut self) {
        self.registered = true;
        info!(tool = self.names[0], "tool registered");
    }

    fn deregister(&mut self) {
        if self.active {
            self.deactivate();
        }
        self.registered = false;
        info!(tool = self.names[0], "tool deregistered");
    }

    fn activate(&mut self) {
        if !self.active {
            self.active = true;
            info!(tool = self.names[0], "tool activated");
        }
    }

    fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            self.session.cancel();
            info!(tool = self.names[0], "tool deactivated");
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn handle_pick(&mut self, pick: Option<PickResult>) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        let Some(pick) = pick else {
            debug!(tool = self.names[0], "click without snapped geometry ignored");
            return Ok(false);
        };

        match self.session.add_point(pick.object_id, pick.point)? {
            PickOutcome::Accepted { .. } => Ok(false),
            PickOutcome::Resolved(_) => Ok(true),
        }
    }

    fn handle_cancel(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.session.cancel();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MarkerLayer, SceneTransforms};
    use pickalign_core::{ObjectId, Point3d, RigidTransform, Vector3d};

    fn translation_tool() -> PickAlignTool<SceneTransforms, MarkerLayer> {
        PickAlignTool::new(
            &AlignConfig::for_mode(AlignmentMode::Translation),
            SceneTransforms::new(),
            MarkerLayer::new(),
        )
    }

    fn pick(object: u32, x: f64, y: f64, z: f64) -> Option<PickResult> {
        Some(PickResult::new(object, Point3d::new(x, y, z)))
    }

    #[test]
    fn test_names_and_priority() {
        let tool = translation_tool();
        assert_eq!(tool.names(), &["pickalign-translation-tool"]);
        assert_eq!(tool.priority(), 13);
        assert!(!tool.is_active());
        assert!(!tool.is_registered());
    }

    #[test]
    fn test_inactive_tool_ignores_input() {
        let mut tool = translation_tool();
        assert!(!tool.handle_pick(pick(1, 0.0, 0.0, 0.0)).unwrap());
        assert!(tool.session().is_idle());
        assert!(!tool.handle_cancel());
        assert!(!tool.handle_key_up(ESCAPE_KEY_CODE));
    }

    #[test]
    fn test_pick_flow_consumes_resolving_event() {
        let mut tool = translation_tool();
        tool.register();
        tool.activate();

        assert!(!tool.handle_pick(None).unwrap());
        assert!(!tool.handle_pick(pick(1, 0.0, 0.0, 0.0)).unwrap());
        assert!(tool.handle_pick(pick(2, 1.0, 2.0, 3.0)).unwrap());

        assert_eq!(
            tool.session().transforms().transform(ObjectId(1)),
            Some(RigidTransform::translation(Vector3d::new(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn test_clicks_and_keys() {
        let mut tool = translation_tool();
        tool.activate();

        let snapped = pick(4, 1.0, 1.0, 1.0);
        assert!(!tool.handle_single_click(MouseButton::Secondary, &snapped).unwrap());
        assert!(tool.session().is_idle());

        assert!(!tool.handle_single_click(MouseButton::Primary, &snapped).unwrap());
        assert_eq!(tool.session().transforming_object_id(), Some(ObjectId(4)));

        assert!(!tool.handle_key_up(13));
        assert!(!tool.session().is_idle());
        assert!(tool.handle_key_up(ESCAPE_KEY_CODE));
        assert!(tool.session().is_idle());
    }

    #[test]
    fn test_deactivate_clears_markers_and_session() {
        let mut tool = translation_tool();
        tool.register();
        tool.activate();
        tool.activate();
        tool.handle_pick(pick(1, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(tool.session().markers().len(), 1);

        tool.deregister();
        assert!(!tool.is_active());
        assert!(!tool.is_registered());
        assert!(tool.session().is_idle());
        assert!(tool.session().markers().is_empty());
    }

    #[test]
    fn test_tool_as_trait_object() {
        let mut tool = translation_tool();
        let dyn_tool: &mut dyn AlignmentTool = &mut tool;
        dyn_tool.activate();
        dyn_tool.handle_pick(pick(1, 0.0, 0.0, 0.0)).unwrap();
        assert!(dyn_tool.handle_pick(pick(2, 0.0, 0.0, 5.0)).unwrap());
    }
}
