//! Full HTML pages: the editor overview, the standalone viewer, and the
//! 404 page with app-id guidance.

use crate::app_id::{looks_like_app_id_path, AppId, EXAMPLE_APP_ID};
use crate::bridge::{HANDLER_NAME, HOST_SOURCE};
use crate::editor::EditorState;
use crate::navigation::PreviewMode;
use crate::style::StyleField;

use super::html::{page_with_script, to_html};
use super::view::{Element, ViewNode};

/// Wires `data-action` controls to the native handler or a local toast, and
/// remembers the app id the host announces after load.
///
/// Answer controls either post to the element marked
/// `data-interactions-url` (editor page) or submit their enclosing answer
/// form (viewer).
fn bridge_script() -> String {
    format!(
        r#"(function () {{
  var handler = window.webkit && window.webkit.messageHandlers && window.webkit.messageHandlers.{HANDLER_NAME};
  function post(message) {{ if (handler) {{ handler.postMessage(message); }} }}
  function toast(text) {{
    var el = document.createElement('div');
    el.className = 'fixed bottom-6 left-1/2 -translate-x-1/2 rounded-md bg-gray-900 px-4 py-2 text-sm text-white';
    el.textContent = text;
    document.body.appendChild(el);
    setTimeout(function () {{ el.remove(); }}, 2000);
  }}
  window.addEventListener('message', function (event) {{
    if (event.data && event.data.source === '{HOST_SOURCE}') {{ window.flowKitAppId = event.data.appId; }}
  }});
  var recorder = document.querySelector('[data-interactions-url]');
  function record(kind, value, reload) {{
    fetch(recorder.getAttribute('data-interactions-url'), {{
      method: 'POST',
      headers: {{ 'Content-Type': 'application/json' }},
      body: JSON.stringify({{
        index: Number(recorder.getAttribute('data-preview-index')),
        interaction: {{ kind: kind, value: value }}
      }})
    }}).then(function (response) {{ if (reload && response.ok) {{ window.location.reload(); }} }});
  }}
  document.addEventListener('input', function (event) {{
    if (recorder && event.target.matches('[data-slide-input]')) {{
      record('inputChanged', event.target.value, false);
    }}
  }});
  document.addEventListener('change', function (event) {{
    if (!event.target.matches('[data-slide-date]')) {{ return; }}
    if (recorder) {{ record('selectDate', event.target.value, true); }}
    else if (event.target.form) {{ event.target.form.submit(); }}
  }});
  document.addEventListener('click', function (event) {{
    var option = event.target.closest('[data-option]');
    if (option && recorder && !option.form) {{
      record('selectChoice', option.getAttribute('data-option'), true);
      return;
    }}
    var target = event.target.closest('[data-action]');
    if (!target) {{ return; }}
    var action = target.getAttribute('data-action');
    if (action === 'complete') {{ post({{ action: 'complete' }}); }}
    else if (action === 'close') {{ post({{ action: 'close' }}); }}
    else if (action === 'toast') {{ toast(target.getAttribute('data-toast')); }}
    else if (action === 'replay') {{ window.location.reload(); }}
  }});
}})();"#
    )
}

pub fn viewer_page(flow_name: &str, screen: ViewNode, mode: PreviewMode) -> String {
    let wrapper_class = if mode.is_embedded() {
        "h-screen w-screen"
    } else {
        "h-screen w-screen flex items-center justify-center bg-gray-50"
    };
    let body: ViewNode = Element::new("main")
        .class(wrapper_class)
        .child(super::phone_frame(screen, mode))
        .into();
    page_with_script(flow_name, &to_html(&body), Some(&bridge_script()))
}

fn slide_list(editor: &EditorState) -> Element {
    let selected = editor.selected_slide_id();
    let items = editor.slides().iter().enumerate().map(|(i, slide)| {
        let is_selected = selected == Some(slide.id.as_str());
        Element::new("li")
            .class("flex items-center gap-3 rounded-md border px-3 py-2")
            .class_if(is_selected, "border-blue-500 bg-blue-50")
            .attr("data-slide-id", slide.id.clone())
            .attr("aria-selected", is_selected.to_string())
            .child(
                Element::new("span")
                    .class("text-xs text-gray-500")
                    .text((i + 1).to_string()),
            )
            .child(
                Element::new("span")
                    .class("text-xs font-medium uppercase text-gray-600")
                    .text(slide.slide_type.label()),
            )
            .child(
                Element::new("span")
                    .class("truncate text-sm")
                    .text(slide.title.clone().unwrap_or_else(|| "Untitled".into())),
            )
    });

    Element::new("section")
        .class("w-72 border-r p-4 overflow-y-auto")
        .child(Element::new("h2").class("mb-3 text-sm font-semibold").text("Slides"))
        .child(Element::new("ol").class("space-y-2").children(items))
}

fn global_styles_panel(editor: &EditorState) -> Element {
    let styles = serde_json::to_value(&editor.flow().global_styles).unwrap_or_default();
    let rows = StyleField::ALL.iter().filter_map(|field| {
        let value = styles.get(field.name())?;
        let shown = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Some(
            Element::new("tr")
                .child(Element::new("td").class("pr-4 text-gray-500").text(field.name()))
                .child(Element::new("td").class("font-mono").text(shown)),
        )
    });

    Element::new("section")
        .class("w-72 border-l p-4 overflow-y-auto text-xs")
        .child(
            Element::new("h2")
                .class("mb-3 text-sm font-semibold")
                .text("Global styles"),
        )
        .child(Element::new("table").child(Element::new("tbody").children(rows)))
}

/// `interactions_url` receives answers given in the phone preview.
pub fn editor_page(
    editor: &EditorState,
    app_id: &AppId,
    preview: ViewNode,
    interactions_url: &str,
) -> String {
    let header = Element::new("header")
        .class("flex items-center justify-between border-b px-6 py-3")
        .child(
            Element::new("h1")
                .class("text-lg font-semibold")
                .text(editor.flow().name.clone()),
        )
        .child(
            Element::new("code")
                .class("rounded bg-gray-100 px-2 py-1 text-xs")
                .attr("data-app-id", app_id.as_str())
                .text(app_id.as_str()),
        );

    let root = Element::new("div").class("flex h-screen flex-col");
    let root = match editor.selected_index() {
        Some(index) => root
            .attr("data-interactions-url", interactions_url)
            .attr("data-preview-index", index.to_string()),
        None => root,
    };
    let body: ViewNode = root
        .child(header)
        .child(
            Element::new("div")
                .class("flex flex-1 overflow-hidden")
                .child(slide_list(editor))
                .child(
                    Element::new("main")
                        .class("flex flex-1 items-center justify-center bg-gray-50")
                        .child(super::phone_frame(preview, PreviewMode::Editor)),
                )
                .child(global_styles_panel(editor)),
        )
        .into();

    page_with_script(
        &format!("{} - FlowKit Studio", editor.flow().name),
        &to_html(&body),
        Some(&bridge_script()),
    )
}

pub fn not_found_page(path: &str) -> String {
    let guidance = looks_like_app_id_path(path).then(|| {
        Element::new("div")
            .class("bg-amber-50 border border-amber-200 rounded-md p-4 mb-6 text-left")
            .attr("data-guidance", "app-id")
            .child(Element::new("p").class("text-amber-800 text-sm").text(
                "It looks like you're trying to access an onboarding flow with an app ID. \
                 Please make sure that:",
            ))
            .child(
                Element::new("ul")
                    .class("text-amber-700 text-sm list-disc list-inside mt-2")
                    .child(Element::new("li").text("The app ID is correct (check for typos)"))
                    .child(
                        Element::new("li")
                            .text("The onboarding flow has been created and published"),
                    )
                    .child(
                        Element::new("li")
                            .text("You're using the latest version of the FlowKit SDK"),
                    ),
            )
            .child(
                Element::new("p")
                    .class("text-amber-800 text-sm mt-2")
                    .text("App IDs should look like: ")
                    .child(Element::new("code").text(EXAMPLE_APP_ID)),
            )
    });

    let body: ViewNode = Element::new("div")
        .class("min-h-screen flex items-center justify-center bg-gray-100")
        .child(
            Element::new("div")
                .class("text-center p-8 bg-white rounded-lg shadow-md max-w-md")
                .child(Element::new("h1").class("text-6xl font-bold text-red-500 mb-4").text("404"))
                .child(
                    Element::new("p")
                        .class("text-xl text-gray-700 mb-4")
                        .text("Oops! Page not found"),
                )
                .child(
                    Element::new("p")
                        .class("text-gray-600 mb-6")
                        .text("The requested URL ")
                        .child(
                            Element::new("span")
                                .class("font-mono bg-gray-100 px-2 py-1 rounded")
                                .text(path),
                        )
                        .text(" was not found."),
                )
                .child_opt(guidance)
                .child(
                    Element::new("a")
                        .class("inline-block rounded-md bg-blue-500 px-4 py-2 text-white")
                        .attr("href", "/")
                        .text("Return to Home"),
                ),
        )
        .into();

    super::html::page("Page not found", &to_html(&body))
}
