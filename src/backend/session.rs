use super::native::NativeType;
use super::types::SourceId;

/// Local bookkeeping of drag gestures, used to label log lines.
///
/// The authoritative session lives in the monitor; this only numbers gestures so that the
/// begin/end lines of one gesture can be matched up in the logs.
#[derive(Debug, Default)]
pub(super) struct DragSession {
    next_id: u64,
    active: Option<ActiveSession>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum SessionKind {
    Registered(SourceId),
    Native(NativeType),
}

#[derive(Debug)]
struct ActiveSession {
    id: u64,
    kind: SessionKind,
}

impl DragSession {
    pub(super) fn start(&mut self, kind: SessionKind) -> String {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        let replaced = self.active.replace(ActiveSession { id, kind });
        match replaced {
            Some(previous) => format!(
                "session START id={id} kind={kind:?} (replaced id={} without END)",
                previous.id
            ),
            None => format!("session START id={id} kind={kind:?}"),
        }
    }

    pub(super) fn end(&mut self, reason: &'static str) -> String {
        match self.active.take() {
            Some(ended) => format!(
                "session END id={} kind={:?} reason={reason}",
                ended.id, ended.kind
            ),
            None => format!("session END reason={reason} (no active session)"),
        }
    }

    pub(super) fn active_id(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.id)
    }
}
