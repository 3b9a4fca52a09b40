use std::collections::VecDeque;

use super::Html5Backend;
use super::collaborators::DragDropManager;
use super::host::HostWindow;

/// Bounded log of lifecycle lines, for copy-paste into bug reports.
#[derive(Debug, Default)]
pub(super) struct DebugLog {
    lines: VecDeque<String>,
    event_serial: u64,
}

impl DebugLog {
    pub(super) fn next_event(&mut self) {
        self.event_serial = self.event_serial.wrapping_add(1);
    }

    fn push(&mut self, capacity: usize, message: String) {
        let cap = capacity.clamp(1, 10_000);
        while self.lines.len() >= cap {
            self.lines.pop_front();
        }
        self.lines
            .push_back(format!("[event {}] {}", self.event_serial, message));
    }
}

impl<W, M> Html5Backend<W, M>
where
    W: HostWindow,
    W::Node: 'static,
    M: DragDropManager,
{
    pub(super) fn debug_log_event(&mut self, message: String) {
        log::debug!("{message}");
        if !self.options.debug_event_log {
            return;
        }
        let capacity = self.options.debug_event_log_capacity;
        self.debug_log.push(capacity, message);
    }

    /// The recorded debug lines, oldest first.
    ///
    /// Empty unless [`super::BackendOptions::debug_event_log`] is set.
    pub fn debug_log_text(&self) -> String {
        self.debug_log
            .lines
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_keeps_the_newest_lines() {
        let mut log = DebugLog::default();
        for i in 0..5 {
            log.next_event();
            log.push(3, format!("line {i}"));
        }
        let lines: Vec<&str> = log.lines.iter().map(String::as_str).collect();
        assert_eq!(lines, ["[event 3] line 2", "[event 4] line 3", "[event 5] line 4"]);
    }
}
