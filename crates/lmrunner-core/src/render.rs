// ── Presentation ──
//
// Pure renderers for device details and script output. The HTML documents
// are self-contained (inline CSS, dark console theme); every interpolated
// value is escaped.

use crate::model::Device;

const DEVICE_CSS: &str = "\
body { background-color: #2e3436; color: #dcdcdc; font-family: 'Courier New', monospace; \
font-size: 16px; line-height: 1.6; padding: 20px; }
h1 { color: #f8f8f2; font-size: 32px; margin-bottom: 20px; }
.device-info { margin-top: 20px; background-color: #1e2222; padding: 15px; border-radius: 5px; \
box-shadow: inset 0 0 10px rgba(0, 0, 0, 0.2); }
.device-info p { margin: 5px 0; font-size: 16px; }
.device-info .label { font-weight: bold; color: #f8f8f2; }";

const OUTPUT_CSS: &str = "\
body { background-color: #2e3436; color: #dcdcdc; font-family: 'Courier New', monospace; \
font-size: 14px; padding: 20px; margin: 0; line-height: 1.5; overflow-y: auto; }
.header { font-size: 18px; font-weight: bold; color: #f8f8f2; margin-bottom: 10px; }
.description { font-size: 14px; color: #aaa; margin-bottom: 20px; }
.device-details { color: #f8f8f2; margin-bottom: 20px; background-color: #1e2222; padding: 10px; \
border-radius: 5px; box-shadow: inset 0 0 10px rgba(0, 0, 0, 0.2); }
.console { white-space: pre-wrap; overflow-wrap: break-word; max-height: 500px; padding: 10px; \
border-radius: 5px; background-color: #1e2222; color: #f8f8f2; font-size: 13px; overflow-y: auto; }";

const OUTPUT_DESCRIPTION: &str =
    "Here is the output of your script execution. Scroll through the results below:";

/// Escape the five HTML-significant characters.
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Standalone HTML page describing one device.
pub fn device_document(device: &Device) -> String {
    format!(
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{DEVICE_CSS}\n</style>\n</head>\n<body>\n\
<h1>Device Details</h1>\n<div class=\"device-info\">\n\
<p><span class=\"label\">Device Name:</span> {}</p>\n\
<p><span class=\"label\">Device ID:</span> {}</p>\n\
<p><span class=\"label\">Collector ID:</span> {}</p>\n\
</div>\n</body>\n</html>\n",
        html_escape(&device.label),
        html_escape(&device.id),
        html_escape(&device.collector_id),
    )
}

/// Standalone HTML page with a script's console output.
///
/// Newlines in the output become `<br/>`.
pub fn output_document(device: &Device, output: &str) -> String {
    let console = html_escape(output).replace("\r\n", "\n").replace('\n', "<br/>");
    let label = html_escape(&device.label);

    format!(
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{OUTPUT_CSS}\n</style>\n</head>\n<body>\n\
<div class=\"header\">Script Output - Device: {label}</div>\n\
<div class=\"device-details\">\n<strong>Device Details:</strong><br/>\n\
<strong>Label:</strong> {label}<br/>\n\
<strong>ID:</strong> {}<br/>\n\
<strong>Collector ID:</strong> {}<br/>\n\
</div>\n<div class=\"description\">{OUTPUT_DESCRIPTION}</div>\n\
<div class=\"console\">{console}</div>\n</body>\n</html>\n",
        html_escape(&device.id),
        html_escape(&device.collector_id),
    )
}

/// Terminal rendering of a device.
pub fn device_text(device: &Device) -> String {
    format!(
        "Device Name:  {}\nDevice ID:    {}\nCollector ID: {}\n",
        device.label, device.id, device.collector_id
    )
}

/// Terminal rendering of a script result: a header line, then the output.
pub fn output_text(device: &Device, output: &str) -> String {
    let mut text = format!(
        "Script Output - Device: {} (id {}, collector {})\n",
        device.label, device.id, device.collector_id
    );
    text.push_str(output);
    if !output.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn device() -> Device {
        Device {
            label: "<core> & \"edge\"".into(),
            id: "42".into(),
            collector_id: "7".into(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom's & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#39;s &amp; co&lt;/a&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn device_document_lists_fields_escaped() {
        let doc = device_document(&device());

        assert!(doc.contains("<h1>Device Details</h1>"));
        assert!(doc.contains("Device Name:</span> &lt;core&gt; &amp; &quot;edge&quot;</p>"));
        assert!(doc.contains("Device ID:</span> 42</p>"));
        assert!(doc.contains("Collector ID:</span> 7</p>"));
        assert!(!doc.contains("<core>"));
    }

    #[test]
    fn output_document_converts_newlines_after_escaping() {
        let doc = output_document(&device(), "line 1\n<b>line 2</b>\r\nline 3");

        assert!(
            doc.contains(r#"<div class="console">line 1<br/>&lt;b&gt;line 2&lt;/b&gt;<br/>line 3</div>"#)
        );
        assert!(doc.contains("Script Output - Device: &lt;core&gt;"));
        assert!(doc.contains(OUTPUT_DESCRIPTION));
    }

    #[test]
    fn text_renderings() {
        let device = Device {
            label: "router1-east".into(),
            id: "42".into(),
            collector_id: "7".into(),
        };

        assert_eq!(
            device_text(&device),
            "Device Name:  router1-east\nDevice ID:    42\nCollector ID: 7\n"
        );
        assert_eq!(
            output_text(&device, "done"),
            "Script Output - Device: router1-east (id 42, collector 7)\ndone\n"
        );
    }
}
