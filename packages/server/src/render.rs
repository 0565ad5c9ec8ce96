//! Entry render flow: normalize the id, look up the entry, then its media,
//! and build the model the entry page is rendered from.

use common::deep_link::DeepLinkTarget;
use common::{Entry, MediaBuckets, normalize_qrx_id};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::ConfigPresence;
use crate::store::QrxStore;

/// Query switches of the entry page. Only the literal value `"1"` turns one on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    pub save: bool,
    pub debug: bool,
}

impl RenderFlags {
    pub fn from_query(save: Option<&str>, debug: Option<&str>) -> Self {
        Self {
            save: save == Some("1"),
            debug: debug == Some("1"),
        }
    }
}

/// Diagnostics shown with `debug=1`. Configuration appears as presence flags
/// only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DebugPayload {
    pub id_param: String,
    pub qrx_id: String,
    pub entry_found: bool,
    pub entry_error: Option<String>,
    pub media_count: usize,
    pub media_error: Option<String>,
    pub env: ConfigPresence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoundModel {
    pub entry: Entry,
    pub media: MediaBuckets,
    pub deep_link: DeepLinkTarget,
    pub save: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryView {
    Found(Box<FoundModel>),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub qrx_id: String,
    pub view: EntryView,
    pub debug: Option<DebugPayload>,
}

/// Build the entry page model for a raw path segment.
///
/// An entry lookup error renders as not-found. A media lookup error renders
/// the entry with no media. Neither is retried.
#[instrument(skip(store, presence), fields(qrx_id = tracing::field::Empty))]
pub async fn render_entry(
    store: &dyn QrxStore,
    raw_id: &str,
    flags: RenderFlags,
    presence: ConfigPresence,
) -> RenderOutcome {
    let qrx_id = normalize_qrx_id(raw_id);
    tracing::Span::current().record("qrx_id", qrx_id.as_str());

    let mut debug = DebugPayload {
        id_param: raw_id.to_string(),
        qrx_id: qrx_id.clone(),
        entry_found: false,
        entry_error: None,
        media_count: 0,
        media_error: None,
        env: presence,
    };

    let entry = match store.find_entry(&qrx_id).await {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Entry lookup failed: {e}");
            debug.entry_error = Some(e.to_string());
            None
        }
    };

    let view = match entry {
        None => {
            info!("Entry not found");
            EntryView::NotFound
        }
        Some(entry) => {
            debug.entry_found = true;
            let media = match store.list_media(&qrx_id).await {
                Ok(media) => media,
                Err(e) => {
                    warn!("Media lookup failed, rendering without media: {e}");
                    debug.media_error = Some(e.to_string());
                    Vec::new()
                }
            };
            debug.media_count = media.len();
            EntryView::Found(Box::new(FoundModel {
                deep_link: DeepLinkTarget::for_entry(&qrx_id, flags.save),
                media: MediaBuckets::partition(media),
                entry,
                save: flags.save,
            }))
        }
    };

    RenderOutcome {
        qrx_id,
        view,
        debug: flags.debug.then_some(debug),
    }
}
