use std::fmt::Write;

use common::deep_link;

use super::{escape_html, external_url, layout};
use crate::config::LinksConfig;

/// Install page shown when a deep link was not picked up.
///
/// `from` is the site-local path the visitor came from; it is offered both as
/// a way back and as a deep link into the app.
pub fn get_app_page(links: &LinksConfig, from: &str) -> String {
    let mut stores = String::new();
    store_link(&mut stores, links.android_url(), "Android", "QRX__LINKS__ANDROID_URL");
    store_link(&mut stores, links.ios_url(), "iOS", "QRX__LINKS__IOS_URL");

    let body = format!(
        "<main><div class=\"card\">\
         <h1 class=\"title\">mioseg qr installieren</h1>\
         <p class=\"sub\">Du hast einen QR-X Link geöffnet, aber die App ist auf diesem Gerät \
         noch nicht installiert.<br>Installiere die App, damit du QR-X Inhalte direkt speichern \
         und verwalten kannst.</p>\
         <div class=\"row\" style=\"margin-top:14px\">{stores}</div>\
         <div style=\"margin-top:16px\"><a class=\"btn\" href=\"{app}\">App ist installiert? Jetzt öffnen</a></div>\
         <div style=\"margin-top:18px\"><a href=\"{back}\">← Zurück zum QR-X Inhalt</a></div>\
         </div></main>",
        app = escape_html(&deep_link::app_link_for_path(from)),
        back = escape_html(from),
    );
    layout("mioseg qr installieren", &body)
}

fn store_link(out: &mut String, url: Option<&str>, platform: &str, setting: &str) {
    match url {
        Some(url) => {
            let _ = write!(
                out,
                "<a class=\"btn\" href=\"{}\">{platform} herunterladen</a>",
                external_url(url)
            );
        }
        None => {
            let _ = write!(
                out,
                "<div class=\"muted\">{platform}-Link fehlt ({setting}). Du kannst ihn später eintragen.</div>"
            );
        }
    }
}

/// Keep `from` to site-local paths; anything else goes back to `/`.
pub fn sanitize_from(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}
