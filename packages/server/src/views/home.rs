use common::deep_link::GET_APP_PATH;

use super::layout;

/// Landing page at `/`.
pub fn home_page() -> String {
    let body = format!(
        "<main style=\"text-align:center\">\
         <h1 class=\"title\" style=\"margin-top:48px\">mioseg qr</h1>\
         <p class=\"sub\">QR-X Inhalte ansehen, teilen und speichern</p>\
         <div class=\"card\" style=\"margin-top:24px\">\
         <p>Dieser QR-X wurde mit <strong>mioseg qr</strong> erstellt.</p>\
         <p>Mit der App kannst du QR-X speichern, Updates erhalten und Inhalte verwalten.</p>\
         </div>\
         <div class=\"row\" style=\"justify-content:center;margin-top:24px\">\
         <a class=\"btn primary\" href=\"{GET_APP_PATH}\">App herunterladen</a>\
         <a class=\"btn\" href=\"/qrx/demo\">Beispiel-QR-X ansehen</a>\
         </div>\
         <footer class=\"footer\">© {} mioseg qr</footer></main>",
        chrono::Utc::now().format("%Y"),
    );
    layout("mioseg qr", &body)
}
