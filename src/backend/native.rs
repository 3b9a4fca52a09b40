//! Native (external) drag items: files, URLs and plain text dragged from outside the
//! registered source set.

use std::cell::RefCell;

use super::collaborators::DragDropMonitor;
use super::host::{DataTransfer, HostError};
use super::types::{ItemType, SourceId};

/// A file carried by a native drag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NativeFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NativeType {
    File,
    Url,
    Text,
}

impl NativeType {
    /// Match priority when a payload advertises several kinds.
    pub const ALL: [Self; 3] = [Self::File, Self::Url, Self::Text];

    pub const FILE_TYPE: ItemType = ItemType::from_static("__NATIVE_FILE__");
    pub const URL_TYPE: ItemType = ItemType::from_static("__NATIVE_URL__");
    pub const TEXT_TYPE: ItemType = ItemType::from_static("__NATIVE_TEXT__");

    pub fn item_type(self) -> ItemType {
        match self {
            Self::File => Self::FILE_TYPE,
            Self::Url => Self::URL_TYPE,
            Self::Text => Self::TEXT_TYPE,
        }
    }

    pub fn from_item_type(item_type: &ItemType) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|native| native.item_type() == *item_type)
    }

    /// Transfer type identifiers that identify this kind, in lookup order.
    pub fn matches_types(self) -> &'static [&'static str] {
        match self {
            Self::File => &["Files"],
            Self::Url => &["Url", "text/uri-list"],
            Self::Text => &["Text", "text/plain"],
        }
    }
}

/// Classify a transfer payload as a native item.
///
/// Returns `Ok(None)` if the payload is readable but carries nothing we recognize,
/// and an error if the host refuses to expose the type list right now.
pub fn match_native_item_type<N>(
    transfer: &dyn DataTransfer<N>,
) -> Result<Option<NativeType>, HostError> {
    let types = transfer.types()?.unwrap_or_default();
    Ok(NativeType::ALL.into_iter().find(|native| {
        native
            .matches_types()
            .iter()
            .any(|wanted| types.iter().any(|t| t == wanted))
    }))
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NativeData {
    Files(Vec<NativeFile>),
    Urls(Vec<String>),
    Text(String),
}

/// Payload of a native item: only a placeholder until the drop makes the contents readable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NativePayload {
    Pending,
    Ready(NativeData),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NativeItem {
    pub kind: NativeType,
    pub payload: NativePayload,
}

impl NativeItem {
    pub fn is_ready(&self) -> bool {
        matches!(self.payload, NativePayload::Ready(_))
    }
}

/// The synthetic drag source registered for the duration of a native drag.
#[derive(Debug)]
pub struct NativeDragSource {
    item: RefCell<NativeItem>,
}

impl NativeDragSource {
    pub fn new(kind: NativeType) -> Self {
        Self {
            item: RefCell::new(NativeItem {
                kind,
                payload: NativePayload::Pending,
            }),
        }
    }

    pub fn kind(&self) -> NativeType {
        self.item.borrow().kind
    }

    pub fn item(&self) -> NativeItem {
        self.item.borrow().clone()
    }

    /// Read the actual contents from the transfer. Only the first call has an effect.
    pub fn mutate_item_by_reading_data_transfer<N>(&self, transfer: &dyn DataTransfer<N>) {
        let mut item = self.item.borrow_mut();
        if item.is_ready() {
            log::debug!("native item already read, ignoring second read");
            return;
        }
        let data = read_native_data(item.kind, transfer);
        item.payload = NativePayload::Ready(data);
    }

    pub fn can_drag(&self, _monitor: &dyn DragDropMonitor) -> bool {
        true
    }

    pub fn is_dragging(&self, monitor: &dyn DragDropMonitor, handle: SourceId) -> bool {
        monitor.source_id() == Some(handle)
    }
}

fn read_native_data<N>(kind: NativeType, transfer: &dyn DataTransfer<N>) -> NativeData {
    match kind {
        NativeType::File => NativeData::Files(transfer.files()),
        NativeType::Url => {
            let raw = first_non_empty(transfer, kind.matches_types());
            NativeData::Urls(
                raw.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_owned)
                    .collect(),
            )
        }
        NativeType::Text => NativeData::Text(first_non_empty(transfer, kind.matches_types())),
    }
}

fn first_non_empty<N>(transfer: &dyn DataTransfer<N>, formats: &[&str]) -> String {
    formats
        .iter()
        .find_map(|format| match transfer.get_data(format) {
            Ok(data) if !data.is_empty() => Some(data),
            Ok(_) => None,
            Err(err) => {
                log::warn!("failed to read native data as {format}: {err}");
                None
            }
        })
        .unwrap_or_default()
}
