//! Static gallery generation.
//!
//! Builds a self-contained site under `<indir>/docs/`: one pannellum viewer
//! page per panorama image, an index page linking them all, and the optional
//! floor-plan image below the list. The output directory is wiped and
//! recreated on every run so it only ever contains fresh files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::discover::is_image_name;

/// Case-insensitive filenames treated as the floor-plan image.
const PLAN_NAMES: [&str; 4] = ["plan.jpg", "plan.jpeg", "plan.png", "plan.webp"];

/// Subdirectory receiving the generated site (GitHub Pages serves /docs).
const OUTPUT_DIR_NAME: &str = "docs";

const VIEWER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/pannellum@2.5.6/build/pannellum.css">
  <script src="https://cdn.jsdelivr.net/npm/pannellum@2.5.6/build/pannellum.js"></script>
  <style>
    html, body {
      width: 100%;
      height: 100%;
      margin: 0;
      padding: 0;
      background: #000;
      font-family: system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
    }
    #panorama {
      width: 100%;
      height: 100%;
    }
    #back-btn {
      position: absolute;
      top: 15px;
      left: 15px;
      padding: 8px 14px;
      background: rgba(0,0,0,0.6);
      color: white;
      text-decoration: none;
      border-radius: 6px;
      font-size: 14px;
      z-index: 9999;
      backdrop-filter: blur(6px);
    }
    #back-btn:hover {
      background: rgba(0,0,0,0.85);
    }
  </style>
</head>
<body>

  <a id="back-btn" href="index.html">Back</a>
  <div id="panorama"></div>

  <script>
    pannellum.viewer('panorama', {
      type: 'equirectangular',
      panorama: '{image}',
      autoLoad: true,
      showControls: true
    });
  </script>

</body>
</html>
"#;

const INDEX_HEADER: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Panorama index</title>
  <style>
    :root {
      color-scheme: light;
    }
    body {
      margin: 0;
      padding: 40px 0;
      font-family: system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
      background: #f6f5f4;
      color: #1f1f1f;
    }
    .container {
      max-width: 900px;
      margin: 0 auto;
      padding: 32px 28px 36px;
      background: #ffffff;
      border-radius: 12px;
      box-shadow:
        0 0 0 1px rgba(15, 15, 15, 0.06),
        0 18px 45px rgba(15, 15, 15, 0.08);
    }
    h1 {
      font-size: 1.6rem;
      margin: 0 0 8px;
    }
    h2 {
      font-size: 1.1rem;
      margin: 24px 0 8px;
    }
    p {
      margin: 0 0 12px;
      line-height: 1.5;
    }
    .hint {
      font-size: 0.95rem;
      color: #6b6b6b;
      margin-bottom: 18px;
    }
    ol.pano-list {
      margin: 0 0 8px;
      padding-left: 20px;
    }
    ol.pano-list li {
      margin: 4px 0;
    }
    a {
      text-decoration: none;
      color: #2563eb;
    }
    a:hover {
      text-decoration: underline;
    }
    .plan-section {
      margin-top: 28px;
    }
    img.plan {
      max-width: 100%;
      max-height: 70vh;
      height: auto;
      display: block;
      margin: 10px auto 0;
      border-radius: 8px;
      border: 1px solid #e0e0e0;
      box-shadow:
        0 0 0 1px rgba(15, 15, 15, 0.03),
        0 8px 24px rgba(15, 15, 15, 0.06);
    }
  </style>
</head>
<body>
  <div class="container">
    <h1>Panorama index</h1>
"#;

const INDEX_FOOTER: &str = "  </div>\n</body>\n</html>\n";

/// Make a filename stem safe for use in a generated HTML file name.
pub fn safe_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the gallery for all panorama images in `indir`.
pub fn execute(indir: &Path) -> Result<()> {
    let mut plan_image: Option<String> = None;
    let mut panoramas: Vec<String> = Vec::new();

    let entries = fs::read_dir(indir)
        .with_context(|| format!("Failed to read directory: {}", indir.display()))?;
    for entry in entries.flatten() {
        if !entry.path().is_file() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if !is_image_name(&name) {
            continue;
        }
        if PLAN_NAMES.contains(&name.to_lowercase().as_str()) {
            plan_image = Some(name);
        } else {
            panoramas.push(name);
        }
    }
    panoramas.sort_by_key(|name| name.to_lowercase());

    if panoramas.is_empty() && plan_image.is_none() {
        println!("No panorama or plan images found.");
        return Ok(());
    }

    let out_dir = indir.join(OUTPUT_DIR_NAME);
    reset_output_dir(&out_dir)?;

    if let Some(plan) = &plan_image {
        fs::copy(indir.join(plan), out_dir.join(plan))
            .with_context(|| format!("Failed to copy plan image: {plan}"))?;
    }

    let mut index_items: Vec<(String, String)> = Vec::new();
    for name in &panoramas {
        let stem = Path::new(name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(name);
        let viewer_name = format!("view_{}.html", safe_stem(stem));

        fs::copy(indir.join(name), out_dir.join(name))
            .with_context(|| format!("Failed to copy panorama: {name}"))?;

        let html = VIEWER_TEMPLATE
            .replace("{title}", stem)
            .replace("{image}", name);
        fs::write(out_dir.join(&viewer_name), html)
            .with_context(|| format!("Failed to write viewer page: {viewer_name}"))?;
        debug!(panorama = %name, viewer = %viewer_name, "viewer page written");

        index_items.push((stem.to_string(), viewer_name));
    }

    let index = build_index(&index_items, plan_image.as_deref());
    fs::write(out_dir.join("index.html"), index).context("Failed to write index.html")?;

    println!("Generated site in: {}", out_dir.display());
    println!();
    println!("To view locally:");
    println!("1. cd {}", indir.display());
    println!("2. python -m http.server 8000");
    println!("3. Open http://localhost:8000/docs/index.html in your browser");
    println!();
    println!("On GitHub Pages, set Source = main branch, Folder = /docs.");
    Ok(())
}

/// Wipe and recreate the output directory so stale pages never linger.
fn reset_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        let entries = fs::read_dir(out_dir)
            .with_context(|| format!("Failed to read directory: {}", out_dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            let result = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            result.with_context(|| format!("Failed to clear: {}", path.display()))?;
        }
    } else {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create: {}", out_dir.display()))?;
    }
    Ok(())
}

fn build_index(items: &[(String, String)], plan_image: Option<&str>) -> String {
    let mut html = String::from(INDEX_HEADER);

    if !items.is_empty() {
        html.push_str(
            "<p class=\"hint\">Kad atidaryti vizualizacija paspauskite ant patalpos numerio is sio saraso.</p>\n",
        );
        html.push_str("<h2>Panoramos</h2>\n");
        html.push_str("<ol class=\"pano-list\">\n");
        for (title, viewer) in items {
            html.push_str(&format!("  <li><a href=\"{viewer}\">{title}</a></li>\n"));
        }
        html.push_str("</ol>\n");
    }

    if let Some(plan) = plan_image {
        html.push_str("<div class=\"plan-section\">\n");
        html.push_str("<h2>Planas</h2>\n");
        html.push_str(&format!(
            "<img class=\"plan\" src=\"{plan}\" alt=\"Plan\">\n"
        ));
        html.push_str("</div>\n");
    }

    html.push_str(INDEX_FOOTER);
    html
}
