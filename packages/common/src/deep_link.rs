//! Deep links into the companion app and the timed fallback to the install
//! page.
//!
//! Navigating to a custom scheme gives no signal when no app handles it, so
//! a dispatch races the scheme navigation against a fixed countdown. If the
//! page is still around when the countdown runs out, the visitor is sent to
//! the fallback page.

use std::time::Duration;

use tracing::{debug, info};

/// URL scheme registered by the companion app.
pub const APP_SCHEME: &str = "miosegqr";

/// Path of the install page.
pub const GET_APP_PATH: &str = "/get-app";

/// How long a dispatch waits for the app to take over before falling back.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1200);

/// Web path of an entry page, with the save marker when requested.
pub fn entry_path(qrx_id: &str, save: bool) -> String {
    let mut path = format!("/qrx/{}", urlencoding::encode(qrx_id));
    if save {
        path.push_str("?save=1");
    }
    path
}

/// `miosegqr://qrx/{id}`: opens the entry in the app.
pub fn open_link(qrx_id: &str) -> String {
    format!("{APP_SCHEME}://qrx/{}", urlencoding::encode(qrx_id))
}

/// `miosegqr://qrx/{id}?save=1`: asks the app to keep the entry so it
/// receives updates.
pub fn save_link(qrx_id: &str) -> String {
    format!("{}?save=1", open_link(qrx_id))
}

pub fn app_link(qrx_id: &str, save: bool) -> String {
    if save {
        save_link(qrx_id)
    } else {
        open_link(qrx_id)
    }
}

/// Deep link through a development client (e.g. Expo Go) instead of the
/// installed app.
pub fn dev_link(base: &str, qrx_id: &str, save: bool) -> String {
    format!(
        "{}{}",
        base.trim_end_matches('/'),
        entry_path(qrx_id, save)
    )
}

/// Install page URL carrying the entry path for later replay.
pub fn fallback_url(qrx_id: &str, save: bool) -> String {
    format!(
        "{GET_APP_PATH}?from={}",
        urlencoding::encode(&entry_path(qrx_id, save))
    )
}

/// Scheme link that replays a site-local path inside the app.
///
/// `/qrx/abc?save=1` becomes `miosegqr://qrx/abc?save=1`.
pub fn app_link_for_path(path: &str) -> String {
    if path.starts_with('/') {
        format!("{APP_SCHEME}:/{path}")
    } else {
        format!("{APP_SCHEME}://{path}")
    }
}

/// Canonical public URL of an entry page.
pub fn web_link(web_base: &str, qrx_id: &str) -> String {
    format!(
        "{}{}",
        web_base.trim_end_matches('/'),
        entry_path(qrx_id, false)
    )
}

/// The `qrx:<id>` token the app stores for an entry.
pub fn qrx_token(qrx_id: &str) -> String {
    format!("{}{qrx_id}", crate::identifier::QRX_PREFIX)
}

/// Where a dispatch goes first, and where it goes if nothing takes over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkTarget {
    pub scheme_url: String,
    pub fallback_url: String,
}

impl DeepLinkTarget {
    pub fn new(scheme_url: impl Into<String>, fallback_url: impl Into<String>) -> Self {
        Self {
            scheme_url: scheme_url.into(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Target for the "open in app" control of an entry page.
    pub fn for_entry(qrx_id: &str, save: bool) -> Self {
        Self::new(app_link(qrx_id, save), fallback_url(qrx_id, save))
    }
}

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The page was gone when the countdown ran out.
    HandedOff,
    /// The countdown ran out and the fallback navigation was issued.
    FellBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Dispatching,
    Resolved(Resolution),
}

/// The browser side of a dispatch.
pub trait Navigator: Send + Sync {
    /// Point the current page at `url`. Fire-and-forget.
    fn navigate(&self, url: &str);

    /// Whether this page is still the one being shown. Returns `false` once
    /// another application or page has taken over.
    fn is_page_alive(&self) -> bool {
        true
    }
}

/// One "open in app" control.
///
/// `Idle -> Dispatching -> Resolved`. Activation is accepted once; the
/// countdown cannot be cancelled and the scheme navigation is never retried.
#[derive(Debug, Clone)]
pub struct DeepLinkDispatch {
    target: DeepLinkTarget,
    delay: Duration,
    state: DispatchState,
}

impl DeepLinkDispatch {
    pub fn new(target: DeepLinkTarget, delay: Duration) -> Self {
        Self {
            target,
            delay,
            state: DispatchState::Idle,
        }
    }

    pub fn with_default_delay(target: DeepLinkTarget) -> Self {
        Self::new(target, DEFAULT_FALLBACK_DELAY)
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn target(&self) -> &DeepLinkTarget {
        &self.target
    }

    /// Attempt the scheme navigation and start the countdown.
    ///
    /// Returns the countdown length, or `None` if this control was already
    /// activated.
    pub fn activate<N: Navigator + ?Sized>(&mut self, navigator: &N) -> Option<Duration> {
        if self.state != DispatchState::Idle {
            debug!(state = ?self.state, "Ignoring repeated activation");
            return None;
        }
        info!(url = %self.target.scheme_url, "Dispatching deep link");
        navigator.navigate(&self.target.scheme_url);
        self.state = DispatchState::Dispatching;
        Some(self.delay)
    }

    /// Countdown ran out. Falls back unless the page has been left.
    ///
    /// Returns `None` when there is no countdown running.
    pub fn countdown_elapsed<N: Navigator + ?Sized>(
        &mut self,
        navigator: &N,
    ) -> Option<Resolution> {
        if self.state != DispatchState::Dispatching {
            return None;
        }
        let resolution = if navigator.is_page_alive() {
            info!(url = %self.target.fallback_url, "No handoff, navigating to fallback");
            navigator.navigate(&self.target.fallback_url);
            Resolution::FellBack
        } else {
            debug!("Page left before countdown, assuming handoff");
            Resolution::HandedOff
        };
        self.state = DispatchState::Resolved(resolution);
        Some(resolution)
    }

    /// Full dispatch: activate, wait out the countdown, resolve.
    pub async fn run<N: Navigator + ?Sized>(&mut self, navigator: &N) -> Option<Resolution> {
        let delay = self.activate(navigator)?;
        tokio::time::sleep(delay).await;
        self.countdown_elapsed(navigator)
    }
}
