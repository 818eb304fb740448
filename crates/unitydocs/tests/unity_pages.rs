//! Whole-page conversions of Unity documentation exports.

use unitydocs::{convert, ConvertError, UnityDocsConverter};

fn page(section: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>Unity - Manual</title></head>
<body>
<div class="header-wrapper"><h1>Unity Documentation</h1></div>
<div id="content-wrap" class="content-wrap">
<div class="content-block">
<div class="content">
<div class="section">
{}
</div>
</div>
</div>
</div>
</body>
</html>"#,
        section
    )
}

const MANUAL_SECTION: &str = r#"<div class="breadcrumbs clear"><ul><li><a href="index.html">Manual</a></li><li>Cameras</li></ul></div>
<h1>Cameras</h1>
<p>A <strong>Camera</strong> shows the “world” to the <span class="tooltip">player<span class="tooltiptext">The person playing</span></span>. </p>
<ul>
<li>Perspective</li>
<li>Orthographic</li>
</ul>
<p>See <a href="class-Camera.html" title="Camera component">Camera</a>.</p>
<pre class="codeExampleCS"><code>using UnityEngine;

public class Example : MonoBehaviour {}
</code></pre>
<div id="_content"><p>Did you find this page useful?</p></div>"#;

const REFERENCE_SECTION: &str = r#"<div class="mb20 clear"><h1 class="heading inherit">Rigidbody.velocity</h1></div>
<div class="subsection"><div class="signature"><div class="signature-CS sig-block">public <a href="Vector3.html">Vector3</a>velocity;</div></div></div>
<div class="subsection">
<h3>Description</h3>
<p>The velocity vector of the rigidbody.</p>
</div>"#;

#[test]
fn manual_page() {
    let markdown = convert(&page(MANUAL_SECTION)).unwrap();
    assert_eq!(
        markdown,
        concat!(
            "# Cameras\n\n",
            "A **Camera** shows the \"world\" to the player.\n\n",
            "* Perspective\n* Orthographic\n\n",
            "See [Camera](class-Camera.md \"Camera component\").\n\n",
            "```csharp\nusing UnityEngine;\n\npublic class Example : MonoBehaviour {}\n```\n\n",
        )
    );
}

#[test]
fn reference_page() {
    let markdown = convert(&page(REFERENCE_SECTION)).unwrap();
    assert_eq!(
        markdown,
        concat!(
            "# Rigidbody.velocity\n\n",
            "```csharp\npublic Vector3 velocity;\n```\n\n",
            "### Description\n\n",
            "The velocity vector of the rigidbody.\n\n",
        )
    );
}

#[test]
fn manual_page_falls_back_to_h2() {
    let markdown = convert(&page("<h2>Layers</h2>\n<p>Layers group objects.</p>")).unwrap();
    assert_eq!(markdown, "# Layers\n\nLayers group objects.\n\n");
}

#[test]
fn generic_types_survive_in_prose() {
    let section = "<h1>GetComponent</h1>\n<p>Call GetComponent&lt;Rigidbody&gt;() here</p>\n<pre>var rb = GetComponent&lt;Rigidbody&gt;();</pre>";
    let markdown = convert(&page(section)).unwrap();
    assert_eq!(
        markdown,
        concat!(
            "# GetComponent\n\n",
            "Call GetComponent&lt;Rigidbody>() here\n\n",
            "```csharp\nvar rb = GetComponent<Rigidbody>();\n```\n\n",
        )
    );
}

#[cfg(feature = "markdown")]
#[test]
fn escaped_prose_renders_back_as_text() {
    let section = "<h1>GetComponent</h1>\n<p>Call GetComponent&lt;Rigidbody&gt;() here</p>";
    let markdown = convert(&page(section)).unwrap();
    let html = unitydocs::markdown_to_html(&markdown).unwrap();
    assert!(html.contains("Call GetComponent&lt;Rigidbody&gt;() here"));
}

#[test]
fn nested_lists_keep_indentation() {
    let section = "<h1>Steps</h1>\n<ol>\n<li>Open\n<ul>\n<li>File</li>\n<li>Edit</li>\n</ul>\n</li>\n<li>Close</li>\n</ol>";
    let markdown = convert(&page(section)).unwrap();
    assert_eq!(
        markdown,
        "# Steps\n\n1. Open\n    * File\n    * Edit\n2. Close\n\n"
    );
}

#[test]
fn output_has_no_double_blank_lines() {
    let section = "<h1>Gaps</h1>\n<p>one</p>\n<table><tr><td>a</td></tr></table>\n<p>two</p>";
    let markdown = convert(&page(section)).unwrap();
    assert!(!markdown.contains("\n\n\n"));
    assert!(markdown.contains("|a|\n\ntwo"));
}

#[test]
fn missing_container_is_structure_error() {
    let err = convert("<html><body><h1>Not a Unity page</h1></body></html>").unwrap_err();
    assert!(matches!(err, ConvertError::Structure(_)));
}

#[test]
fn missing_heading_is_structure_error() {
    let err = convert(&page("<p>No heading here.</p>")).unwrap_err();
    assert!(matches!(err, ConvertError::Structure(_)));
}

#[test]
fn link_without_href_fails_whole_page() {
    let err = convert(&page("<h1>Broken</h1>\n<p>A <a>dangling</a> link.</p>")).unwrap_err();
    assert!(matches!(err, ConvertError::MissingAttribute { .. }));
}

#[test]
fn converter_is_reusable_across_pages() {
    let converter = UnityDocsConverter::new();
    let first = converter.convert(&page(MANUAL_SECTION)).unwrap();
    let _ = converter.convert(&page(REFERENCE_SECTION)).unwrap();
    assert_eq!(converter.convert(&page(MANUAL_SECTION)).unwrap(), first);
}
