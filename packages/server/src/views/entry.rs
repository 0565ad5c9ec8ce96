use std::fmt::Write;

use common::deep_link::{self, DeepLinkTarget};
use common::{Entry, Media};

use super::script::page_script;
use super::{escape_html, external_url, layout};
use crate::config::LinksConfig;
use crate::render::{DebugPayload, EntryView, FoundModel, RenderOutcome};

/// Inputs of the entry page beyond the render outcome.
pub struct EntryPage<'a> {
    pub outcome: &'a RenderOutcome,
    pub links: &'a LinksConfig,
    /// Show the "app not installed?" download link.
    pub mobile: bool,
}

pub fn entry_page(page: &EntryPage<'_>) -> String {
    let debug = page.outcome.debug.as_ref().map(debug_block).unwrap_or_default();
    match &page.outcome.view {
        EntryView::NotFound => not_found(&debug),
        EntryView::Found(model) => found(page, model, &debug),
    }
}

fn not_found(debug: &str) -> String {
    let body = format!(
        "<main><div class=\"card\">\
         <h1 class=\"title\">404</h1>\
         <p class=\"sub\">QR-X wurde nicht gefunden oder wurde gelöscht.</p>\
         {debug}</div></main>"
    );
    layout("QR-X nicht gefunden", &body)
}

fn found(page: &EntryPage<'_>, model: &FoundModel, debug: &str) -> String {
    let entry = &model.entry;
    let qrx_id = &page.outcome.qrx_id;
    let mut body = String::from("<main>");

    let _ = write!(
        body,
        "<div class=\"header\"><div>\
         <h1 class=\"title\">{}</h1>\
         <p class=\"sub\">Aktuelle Informationen zum QR-X</p></div>\
         <div class=\"cta\">{}</div></div>",
        escape_html(&entry.title),
        actions(page, model),
    );

    body.push_str(debug);

    if let Some(logo) = entry.logo() {
        let _ = write!(
            body,
            "<img class=\"logo\" src=\"{}\" alt=\"Logo\">",
            external_url(logo)
        );
    }

    body.push_str(&description_section(entry));
    body.push_str(&images_section(&model.media.images));
    body.push_str(&files_section(&model.media.files));
    body.push_str(&location_section(entry));
    body.push_str(&news_section(entry));
    body.push_str(&copy_section(page.links, qrx_id));
    body.push_str("<div class=\"footer\">mioseg qr • QR-X Web</div></main>");
    body.push_str(&page_script(page.links.fallback_delay()));

    layout(&entry.title, &body)
}

fn deep_link_button(target: &DeepLinkTarget, class: &str, label: &str) -> String {
    format!(
        "<a class=\"btn {class}\" data-deeplink href=\"{}\" data-fallback=\"{}\">{label}</a>",
        escape_html(&target.scheme_url),
        escape_html(&target.fallback_url),
    )
}

fn actions(page: &EntryPage<'_>, model: &FoundModel) -> String {
    let qrx_id = &page.outcome.qrx_id;
    let mut out = deep_link_button(&model.deep_link, "primary", "In App öffnen");

    if !model.save {
        let save = DeepLinkTarget::for_entry(qrx_id, true);
        out.push_str(&deep_link_button(
            &save,
            "",
            "In App speichern (Updates erhalten)",
        ));
    }

    if let Some(base) = page.links.dev_deep_link_base() {
        for (save, label) in [
            (false, "(DEV) In Expo Go öffnen"),
            (true, "(DEV) In Expo Go speichern"),
        ] {
            let _ = write!(
                out,
                "<a class=\"btn ghost\" data-deeplink href=\"{}\">{label}</a>",
                escape_html(&deep_link::dev_link(base, qrx_id, save)),
            );
        }
    }

    if page.mobile {
        let _ = write!(
            out,
            "<div class=\"hint\">App nicht installiert? <a href=\"{}\">Hier herunterladen</a></div>",
            escape_html(&model.deep_link.fallback_url),
        );
    }
    out
}

fn description_section(entry: &Entry) -> String {
    let text = entry
        .description_text()
        .map(escape_html)
        .unwrap_or_else(|| "Keine Beschreibung vorhanden.".into());
    format!(
        "<section class=\"section\"><h2 class=\"h2\">Beschreibung</h2><p>{text}</p></section>"
    )
}

fn images_section(images: &[Media]) -> String {
    let mut out = String::from("<section class=\"section\"><h2 class=\"h2\">Bilder</h2>");
    if images.is_empty() {
        out.push_str("<p class=\"muted\">Keine Bilder vorhanden.</p>");
    } else {
        out.push_str("<div class=\"grid\">");
        for img in images {
            let url = external_url(&img.url);
            let name = escape_html(&img.filename);
            let _ = write!(
                out,
                "<a class=\"img-card\" href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">\
                 <img src=\"{url}\" alt=\"{name}\"><div class=\"caption\">{name}</div></a>"
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn files_section(files: &[Media]) -> String {
    let mut out = String::from("<section class=\"section\"><h2 class=\"h2\">Dateien</h2>");
    if files.is_empty() {
        out.push_str("<p class=\"muted\">Keine Dateien vorhanden.</p>");
    } else {
        out.push_str("<div>");
        for file in files {
            let _ = write!(
                out,
                "<a class=\"file-row\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">\
                 <span>•</span><span>{}</span></a>",
                external_url(&file.url),
                escape_html(&file.filename),
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn location_section(entry: &Entry) -> String {
    let name = entry
        .location_text()
        .map(escape_html)
        .unwrap_or_else(|| "Kein Ort hinterlegt.".into());
    let mut out = format!(
        "<section class=\"section\"><h2 class=\"h2\">Standort</h2><p>{name}</p>"
    );
    if let Some((lat, lng)) = entry.coordinates() {
        let _ = write!(
            out,
            "<a class=\"btn small\" href=\"https://www.google.com/maps?q={lat},{lng}\" \
             target=\"_blank\" rel=\"noreferrer\">Standort in Google Maps öffnen</a>"
        );
    }
    out.push_str("</section>");
    out
}

fn news_section(entry: &Entry) -> String {
    let mut out =
        String::from("<section class=\"section\"><h2 class=\"h2\">News &amp; Aktualisierungen</h2>");
    if entry.news.is_empty() {
        out.push_str("<p class=\"muted\">Noch keine News vorhanden.</p>");
    } else {
        out.push_str("<div class=\"card\">");
        for item in &entry.news {
            let _ = write!(
                out,
                "<div class=\"news-row\"><div>{}</div><div class=\"news-date\">{}</div></div>",
                escape_html(&item.text),
                escape_html(&item.created_at_display()),
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn copy_section(links: &LinksConfig, qrx_id: &str) -> String {
    let web = deep_link::web_link(links.web_base.trim(), qrx_id);
    let token = deep_link::qrx_token(qrx_id);
    format!(
        "<section class=\"section\"><div class=\"row\">\
         <button class=\"btn small\" data-copy=\"{}\">Web-Link kopieren</button>\
         <button class=\"btn small\" data-copy=\"{token_attr}\">QR-X Key kopieren ({token_attr})</button>\
         </div><div id=\"copyHint\" class=\"hint\"></div>\
         <p class=\"note\">Hinweis: „In App speichern“ sorgt dafür, dass die App intern \
         <b>{token_attr}</b> speichert – dadurch bekommt der Nutzer Updates.</p></section>",
        escape_html(&web),
        token_attr = escape_html(&token),
    )
}

fn debug_block(payload: &DebugPayload) -> String {
    let json = serde_json::to_string_pretty(payload).unwrap_or_default();
    format!("<pre class=\"debug\">{}</pre>", escape_html(&json))
}
