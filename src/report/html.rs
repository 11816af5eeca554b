//! HTML comparison page
//!
//! One self-contained document: the grid is embedded as inline SVG (see
//! [`super::svg`]) and a small script binds hover tooltips and label clicks to
//! it. The same writer serves static reports and the live page of
//! `skillgrid serve`, which additionally passes the ranking list and the
//! endpoints that toggle and remove candidates.

use super::{svg, xml_escape, Summary};
use crate::color::{self, Band};
use crate::grid::render;
use crate::matrix::Matrix;
use crate::roster::{RankedCandidate, RANKING_TITLE, RECOMMENDED_COUNT, RECOMMENDED_NOTE};
use crate::selection::Selection;
use std::io::{self, Write};

/// Extras for the interactive page. The default is a static report.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions<'a> {
    /// Candidate list shown beside the grid.
    pub ranking: Option<&'a [RankedCandidate]>,
    pub selection: Option<&'a Selection>,
    /// Confirmed label clicks POST `?id=<candidate>` here.
    pub remove_url: Option<&'a str>,
    /// Ranking list checkboxes POST `?id=<candidate>` here.
    pub toggle_url: Option<&'a str>,
    /// Shown above the grid when the comparison could not be built.
    pub error: Option<&'a str>,
}

pub fn write<W: Write>(writer: &mut W, matrix: &Matrix, options: &PageOptions) -> io::Result<()> {
    let summary = Summary::from_matrix(matrix);
    let grid_svg = svg::to_string(&render(matrix));
    let legend = build_legend();
    let ranking = options
        .ranking
        .map(|ranked| build_ranking(ranked, options.selection))
        .unwrap_or_default();
    let error = options
        .error
        .map(|e| format!(r#"<div class="error" role="alert">{}</div>"#, xml_escape(e)))
        .unwrap_or_default();
    let leader = summary
        .leader
        .as_ref()
        .map(|l| format!("Top total: {} ({})", xml_escape(&l.name), l.total))
        .unwrap_or_default();

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Skillgrid Comparison</title>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1600px; margin: 0 auto; padding: 2rem; }}

        /* Header */
        .header {{
            display: flex;
            align-items: baseline;
            gap: 1rem;
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }}
        .logo {{
            font-size: 2.5rem;
            font-weight: 800;
            background: linear-gradient(135deg, var(--accent), #a371f7);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }}
        .subtitle {{ color: var(--dim); font-size: 1rem; }}
        .error {{
            background: #3d1418;
            border: 1px solid #f85149;
            color: #ffa198;
            border-radius: 8px;
            padding: 0.75rem 1rem;
            margin-bottom: 1.5rem;
        }}

        .layout {{ display: flex; gap: 1.5rem; align-items: flex-start; }}
        .card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
        }}
        .card-title {{
            font-size: 1rem;
            font-weight: 600;
            margin-bottom: 1rem;
            color: var(--dim);
        }}

        /* Ranking list */
        .ranking {{ min-width: 260px; list-style: none; }}
        .ranking li {{ display: flex; align-items: center; gap: 0.5rem; padding: 0.35rem 0; }}
        .ranking li.recommended .name {{ font-weight: 600; }}
        .ranking .total {{ margin-left: auto; color: var(--dim); font-family: 'SF Mono', monospace; font-size: 0.85rem; }}
        .ranking .separator {{ color: var(--dim); font-size: 0.8rem; border-top: 1px dashed var(--border); margin: 0.5rem 0; padding-top: 0.5rem; }}

        /* Grid */
        .grid-card {{ flex: 1; overflow-x: auto; }}
        .grid-container {{
            position: relative;
            display: inline-block;
            background: #fff;
            color: #000;
            border-radius: 8px;
        }}
        .grid-container .cell {{ cursor: default; }}
        .grid-container .empty-text {{ padding: 1rem; }}

        /* Legend */
        .legend {{ display: flex; gap: 1rem; flex-wrap: wrap; margin-top: 1rem; font-size: 0.85rem; }}
        .legend-item {{ display: flex; align-items: center; gap: 0.4rem; }}
        .legend-swatch {{ width: 14px; height: 14px; border: 1px solid var(--border); }}

        /* Tooltip */
        .tooltip {{
            position: absolute;
            background: rgba(0, 0, 0, 0.7);
            color: #fff;
            padding: 4px 8px;
            border-radius: 4px;
            font-size: 12px;
            max-width: 200px;
            white-space: pre-line;
            pointer-events: none;
            display: none;
            z-index: 1000;
        }}
        .tooltip.visible {{ display: block; }}

        /* Footer */
        .footer {{
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid var(--border);
            color: var(--dim);
            font-size: 0.875rem;
            text-align: center;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">Skillgrid</div>
            <div class="subtitle" id="heading">{heading}</div>
            <div class="subtitle">{leader}</div>
        </div>

        {error}
        <div class="layout">
            {ranking}
            <div class="card grid-card">
                <div class="card-title">Skills by candidate</div>
                <div class="grid-container" id="grid">
                    {grid_svg}
                    <div class="tooltip" id="tooltip"></div>
                </div>
                <div class="legend">{legend}</div>
            </div>
        </div>

        <div class="footer">{skills} skills compared</div>
    </div>

    <script>
    const REMOVE_URL = {remove_url};
    const TOGGLE_URL = {toggle_url};

    const container = document.getElementById('grid');
    const tooltip = document.getElementById('tooltip');

    // Tooltip
    function showTooltip(content, type) {{
        tooltip.textContent = content;
        tooltip.dataset.type = type;
        tooltip.style.left = '0px';
        tooltip.style.top = '0px';
        tooltip.style.transform = type === 'cell' ? 'translate(-50%, -100%)' : 'translate(0, -100%)';
        tooltip.classList.add('visible');
    }}

    function moveTooltip(event) {{
        const rect = container.getBoundingClientRect();
        tooltip.style.left = (event.clientX - rect.left + 10) + 'px';
        tooltip.style.top = (event.clientY - rect.top - 10) + 'px';
    }}

    function hideTooltip() {{
        tooltip.classList.remove('visible');
    }}

    function post(url, id) {{
        return fetch(url + '?id=' + encodeURIComponent(id), {{ method: 'POST' }})
            .then(res => res.json())
            .then(res => {{
                if (!res.ok) window.alert(res.error);
                window.location.reload();
            }});
    }}

    // Candidate labels: total score on hover, confirm-then-remove on click
    container.querySelectorAll('.candidate-label').forEach(label => {{
        label.addEventListener('mouseover', () => showTooltip(label.dataset.tooltip, 'label'));
        label.addEventListener('mousemove', moveTooltip);
        label.addEventListener('mouseout', hideTooltip);
        label.addEventListener('click', () => {{
            if (!REMOVE_URL) return;
            if (window.confirm('Remove ' + label.dataset.name + ' from selected candidates?')) {{
                post(REMOVE_URL, label.dataset.candidate);
            }}
        }});
    }});

    // Cells: reveal the value and show skill and score
    container.querySelectorAll('.cell').forEach(cell => {{
        const value = cell.querySelector('.value');
        cell.addEventListener('mouseover', () => {{
            value.style.opacity = 1;
            showTooltip(cell.dataset.tooltip, 'cell');
        }});
        cell.addEventListener('mousemove', moveTooltip);
        cell.addEventListener('mouseout', () => {{
            value.style.opacity = '';
            hideTooltip();
        }});
    }});

    // Ranking list: toggle selection
    document.querySelectorAll('.ranking input[type=checkbox]').forEach(box => {{
        box.addEventListener('change', () => {{
            if (TOGGLE_URL) post(TOGGLE_URL, box.dataset.candidate);
        }});
    }});
    </script>
</body>
</html>
"#,
        heading = summary.heading(),
        leader = leader,
        error = error,
        ranking = ranking,
        grid_svg = grid_svg,
        legend = legend,
        skills = summary.skills,
        remove_url = js_string(options.remove_url),
        toggle_url = js_string(options.toggle_url),
    )?;

    Ok(())
}

/// Lower bound text for each band, lightest first.
fn band_range(band: Band) -> &'static str {
    match band {
        Band::White => "below 0.5",
        Band::Yellow => "0.5 to 1.5",
        Band::NormalGreen => "1.5 to 2.5",
        Band::HardGreen => "2.5 to 3.5",
        Band::DarkestGreen => "3.5 and up",
    }
}

fn build_legend() -> String {
    let mut items: Vec<String> = Band::all()
        .iter()
        .map(|band| {
            format!(
                r#"<div class="legend-item"><div class="legend-swatch" style="background: {}"></div>{}</div>"#,
                band.color(),
                band_range(*band)
            )
        })
        .collect();
    items.push(format!(
        r#"<div class="legend-item"><div class="legend-swatch" style="background: {}"></div>Experience (years)</div>"#,
        color::NEUTRAL_FILL
    ));
    items.join("")
}

fn build_ranking(ranked: &[RankedCandidate], selection: Option<&Selection>) -> String {
    let mut items = Vec::with_capacity(ranked.len() + 1);

    for (i, candidate) in ranked.iter().enumerate() {
        if i == RECOMMENDED_COUNT {
            items.push(format!(r#"<li class="separator">{}</li>"#, RECOMMENDED_NOTE));
        }
        let checked = selection.map_or(false, |s| s.contains(&candidate.id));
        items.push(format!(
            r#"<li class="{class}"><input type="checkbox" data-candidate="{id}"{checked}><span class="name" title="{full}">{short}</span><span class="total">{total}</span></li>"#,
            class = if candidate.recommended { "recommended" } else { "" },
            id = xml_escape(candidate.id.as_str()),
            checked = if checked { " checked" } else { "" },
            full = xml_escape(&candidate.name),
            short = xml_escape(&candidate.short_name),
            total = crate::format::score(candidate.total_score),
        ));
    }

    format!(
        r#"<div class="card"><div class="card-title">{}</div><ul class="ranking">{}</ul></div>"#,
        RANKING_TITLE,
        items.join("")
    )
}

/// JavaScript literal for an optional string.
fn js_string(value: Option<&str>) -> String {
    match value {
        Some(s) => serde_json::to_string(s).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    }
}
