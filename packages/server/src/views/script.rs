use std::time::Duration;

use common::clipboard::{COPY_FAILED_HINT, COPY_OK_HINT};

/// Browser side of the deep-link dispatch and the copy buttons.
///
/// Every `[data-deeplink]` control runs its own idle/dispatching/resolved
/// machine: the first click navigates to `href` and starts the countdown,
/// later clicks are ignored. When the countdown runs out while the page is
/// still visible, it navigates once to `data-fallback` (if set).
pub fn page_script(fallback_delay: Duration) -> String {
    format!(
        r#"<script>
(function(){{
  var DELAY_MS = {delay};
  function arm(btn){{
    var state = "idle";
    btn.addEventListener("click", function(e){{
      e.preventDefault();
      if(state !== "idle") return;
      var href = btn.getAttribute("href");
      var fallback = btn.getAttribute("data-fallback");
      if(!href) return;
      state = "dispatching";
      try {{ window.location.href = href; }} catch(err){{}}
      setTimeout(function(){{
        if(state !== "dispatching") return;
        if(document.hidden){{ state = "handed-off"; return; }}
        state = "fell-back";
        if(fallback){{ try {{ window.location.href = fallback; }} catch(err){{}} }}
      }}, DELAY_MS);
    }});
  }}
  var links = document.querySelectorAll("[data-deeplink]");
  for(var i = 0; i < links.length; i++) arm(links[i]);

  var hint = document.getElementById("copyHint");
  function show(text){{ if(hint) hint.textContent = text; }}
  function copy(text){{
    try {{
      navigator.clipboard.writeText(text).then(
        function(){{ show({ok}); }},
        function(){{ show({failed}); }}
      );
    }} catch(err) {{
      show({failed});
    }}
  }}
  var copies = document.querySelectorAll("[data-copy]");
  for(var j = 0; j < copies.length; j++) {{
    copies[j].addEventListener("click", function(e){{
      e.preventDefault();
      copy(this.getAttribute("data-copy") || "");
    }});
  }}
}})();
</script>"#,
        delay = fallback_delay.as_millis(),
        ok = js_string(COPY_OK_HINT),
        failed = js_string(COPY_FAILED_HINT),
    )
}

/// JSON string literal that is safe to embed inside a `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}
