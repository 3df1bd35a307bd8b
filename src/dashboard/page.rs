//! Dashboard HTML page.
//!
//! A single self-contained page: a heading, two graph containers and a small
//! script that fetches the figures and posts heatmap clicks back.

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 0; padding: 24px; background: #fafafa; color: #222; }
h1 { text-align: center; font-weight: 600; }
.graph { background: #fff; border: 1px solid #e5e5e5; border-radius: 6px; margin: 16px auto; max-width: 1100px; min-height: 450px; }
"#;

const SCRIPT: &str = r#"
const config = { responsive: true };

async function fetchFigure(url, options) {
  const response = await fetch(url, options);
  if (!response.ok) {
    throw new Error(url + ' returned ' + response.status);
  }
  return response.json();
}

function draw(id, figure) {
  return Plotly.react(id, figure.data, figure.layout, config);
}

async function init() {
  const heatmap = await fetchFigure('/api/heatmap');
  await draw('heatmap', heatmap);
  await draw('radar_chart', await fetchFigure('/api/radar'));

  document.getElementById('heatmap').on('plotly_click', async (event) => {
    const points = event.points.map((p) => ({ x: String(p.x), y: String(p.y) }));
    const radar = await fetchFigure('/api/heatmap/click', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ points }),
    });
    await draw('radar_chart', radar);
  });
}

init().catch((err) => console.error(err));
"#;

/// Render the dashboard page with the given heading.
pub fn render_page(title: &str) -> String {
    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
    <script src="{plotly}"></script>
</head>
<body>
    <h1>{title}</h1>
    <div id="heatmap" class="graph"></div>
    <div id="radar_chart" class="graph"></div>
    <script>{script}</script>
</body>
</html>"#,
        title = title,
        style = STYLE,
        plotly = PLOTLY_CDN,
        script = SCRIPT,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
