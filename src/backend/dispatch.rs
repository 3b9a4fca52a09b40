use super::Html5Backend;
use super::collaborators::DragDropManager;
use super::host::{DragEvent, HostWindow};

/// Whole-event dispatch for hosts that don't deliver capture and bubble phases themselves.
///
/// `path` lists the nodes the event propagates through, from the root down to the event target.
/// Registered sources and targets found on the path are recorded in that order, which leaves the
/// collected ids innermost-first.
impl<W, M> Html5Backend<W, M>
where
    W: HostWindow,
    W::Node: 'static,
    M: DragDropManager,
{
    pub fn dispatch_drag_start<E>(&mut self, e: &mut E, path: &[W::Node])
    where
        E: DragEvent<Node = W::Node>,
    {
        let mut ids = self.handle_top_drag_start_capture();
        for node in path {
            for source in self.registrations.sources_on(node) {
                ids.record(source);
            }
        }
        self.handle_top_drag_start(e, ids);
    }

    pub fn dispatch_drag_end(&mut self) {
        self.handle_top_drag_end_capture();
    }

    pub fn dispatch_drag_enter<E>(&mut self, e: &mut E, path: &[W::Node])
    where
        E: DragEvent<Node = W::Node>,
    {
        let mut ids = self.handle_top_drag_enter_capture(e);
        for node in path {
            for target in self.registrations.targets_on(node) {
                ids.record(target);
            }
        }
        self.handle_top_drag_enter(e, ids);
    }

    pub fn dispatch_drag_leave<E>(&mut self, e: &mut E)
    where
        E: DragEvent<Node = W::Node>,
    {
        self.handle_top_drag_leave_capture(e);
    }

    pub fn dispatch_drag_over<E>(&mut self, e: &mut E, path: &[W::Node])
    where
        E: DragEvent<Node = W::Node>,
    {
        let mut ids = self.handle_top_drag_over_capture();
        for node in path {
            for target in self.registrations.targets_on(node) {
                ids.record(target);
            }
        }
        self.handle_top_drag_over(e, ids);
    }

    pub fn dispatch_drop<E>(&mut self, e: &mut E, path: &[W::Node])
    where
        E: DragEvent<Node = W::Node>,
    {
        let mut ids = self.handle_top_drop_capture(e);
        for node in path {
            for target in self.registrations.targets_on(node) {
                ids.record(target);
            }
        }
        self.handle_top_drop(e, ids);
    }
}
