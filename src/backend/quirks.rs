/// Host implementations with known drag-event delivery quirks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HostKind {
    /// A host that delivers drag events as documented.
    #[default]
    Generic,

    /// Gecko-based hosts (Firefox).
    Gecko,
}

/// Named workaround policies, keyed by host identity but toggleable one by one.
///
/// The state machine only ever consults these flags; it never sniffs the host itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostQuirks {
    /// Don't emit `hover` from `dragenter`.
    ///
    /// Some hosts keep dispatching `dragover` against a target that moved away as the result of
    /// the `dragenter` hover, so hover is only emitted from `dragover` there.
    pub suppress_hover_on_enter: bool,

    /// After a native drag begins, treat the next `mouseover` as a sign that the drag ended
    /// without a `dragend`, and end it on the following animation frame.
    pub native_drag_stuck_detection: bool,
}

impl HostQuirks {
    /// No workarounds.
    pub const NONE: Self = Self {
        suppress_hover_on_enter: false,
        native_drag_stuck_detection: false,
    };

    pub fn for_host(host: HostKind) -> Self {
        match host {
            HostKind::Generic => Self::NONE,
            HostKind::Gecko => Self {
                suppress_hover_on_enter: true,
                native_drag_stuck_detection: true,
            },
        }
    }
}
